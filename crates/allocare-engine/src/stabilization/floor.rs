//! Emergency floor: credits < 60 after any operation are raised to exactly 60

use allocare_common::{Household, LogType, SystemLog, MINIMUM_CREDIT_FLOOR};
use tracing::debug;

/// One top-up applied by the floor pass
#[derive(Debug, Clone, PartialEq)]
pub struct FloorBoost {
    pub household_id: String,
    pub boost: f64,
}

/// Result of a floor pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorReport {
    pub boosts: Vec<FloorBoost>,
    /// One `stabilization` entry per boosted household
    pub logs: Vec<SystemLog>,
    /// Whether any household was topped up
    pub activated: bool,
}

impl FloorReport {
    /// Sum of all boosts
    pub fn total_boost(&self) -> f64 {
        self.boosts.iter().map(|b| b.boost).sum()
    }
}

pub struct EmergencyFloor {
    floor: f64,
}

impl Default for EmergencyFloor {
    fn default() -> Self {
        Self::new(MINIMUM_CREDIT_FLOOR)
    }
}

impl EmergencyFloor {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Top up every household below the floor, in registry order.
    ///
    /// Derived scores are left to the caller's recalculation pass.
    pub fn apply(&self, households: &mut [Household]) -> FloorReport {
        let mut report = FloorReport::default();

        for household in households.iter_mut().filter(|h| h.credits < self.floor) {
            let boost = self.floor - household.credits;
            household.credits = self.floor;

            debug!(household = %household.id, boost, "Emergency floor applied");
            report.logs.push(
                SystemLog::new(
                    LogType::Stabilization,
                    format!(
                        "Emergency Stabilization Fund activated for {}: +{:.0} credits",
                        household.name, boost
                    ),
                )
                .for_household(household.id.clone()),
            );
            report.boosts.push(FloorBoost {
                household_id: household.id.clone(),
                boost,
            });
            report.activated = true;
        }

        report
    }
}
