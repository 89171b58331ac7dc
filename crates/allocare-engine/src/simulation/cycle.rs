//! Cycle engine: Detect -> Prioritize -> Allocate -> Stabilize -> Recalculate

use allocare_common::{
    LogType, MirrorEvent, PovertyTrendPoint, SystemLog, Transfer, EXTREME_POVERTY_THRESHOLD,
    HIGH_POVERTY_THRESHOLD,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::Simulation;
use crate::advisor::{self, RedistributionPolicy};
use crate::scoring;

/// Organic income added per household per cycle
const INCOME_DRIFT: std::ops::Range<f64> = 2.0..10.0;
/// Two independent labor accrual draws
const LABOR_DRIFT_A: std::ops::Range<f64> = 0.0..2.0;
const LABOR_DRIFT_B: std::ops::Range<f64> = 0.0..3.0;
/// Income instability random walk step
const INSTABILITY_DRIFT: std::ops::Range<f64> = -0.0275..0.025;

/// Result of one cycle tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// Cycle number the tick ran as
    pub cycle: u64,
    pub trend_point: PovertyTrendPoint,
    pub redistribution: Option<Transfer>,
    pub households_exited: usize,
    /// Reduction in poverty rate credited by this tick
    pub poverty_reduction: f64,
}

impl Simulation {
    /// Advance the simulation by one cycle
    #[instrument(skip(self), fields(cycle = self.cycle), level = "debug")]
    pub fn run_cycle(&mut self) -> CycleReport {
        let cycle = self.cycle;

        // Prioritize + allocate
        let mut redistribution = None;
        if self.ai_redistribution_enabled {
            let plan = advisor::plan(self.registry.as_slice(), RedistributionPolicy::CYCLE);
            let plan = plan.filter(|p| p.amount > 0.0);
            if let Some((plan, floor)) =
                plan.and_then(|p| self.auto_redistribute(&p).map(|floor| (p, floor)))
            {
                if floor.activated {
                    self.emergency_fund_active = true;
                }
                let donor = self.name_of(&plan.from_id);
                let target = self.name_of(&plan.to_id);
                self.log(
                    SystemLog::new(
                        LogType::Redistribution,
                        format!(
                            "Cycle {}: AI redistributed {} credits from {} to {}",
                            cycle, plan.amount, donor, target
                        ),
                    )
                    .for_household(plan.to_id.clone()),
                );
                self.log_all(floor.logs);
                redistribution = self.transfers.last().cloned();
            }
        }

        // Organic drift
        for household in self.registry.as_mut_slice() {
            household.credits += self.rng.gen_range(INCOME_DRIFT);
            household.labor_hours +=
                self.rng.gen_range(LABOR_DRIFT_A) + self.rng.gen_range(LABOR_DRIFT_B);
            household.income_instability_score += self.rng.gen_range(INSTABILITY_DRIFT);
        }

        // Recalculate + detect
        self.registry.recalculate_all();
        let trend_point = self.measure(cycle);

        let previous_rate = self
            .trend
            .last()
            .map(|p| p.poverty_rate)
            .unwrap_or(trend_point.poverty_rate);
        let poverty_reduction = (previous_rate - trend_point.poverty_rate).max(0.0);
        self.total_poverty_reduction += poverty_reduction;
        self.trend.push(trend_point.clone());

        let mut households_exited = 0;
        for household in self.registry.as_mut_slice() {
            if household.exited_poverty_this_cycle {
                households_exited += 1;
                household.exited_poverty_this_cycle = false;
            }
        }
        self.households_exited_this_cycle = households_exited;

        self.cycle += 1;

        self.emit_households();
        self.emit(MirrorEvent::TrendPoint(trend_point.clone()));
        self.log(SystemLog::new(
            LogType::Info,
            format!(
                "Cycle {} complete: Poverty Rate: {}% | Resilience: {} | Extreme: {}",
                cycle,
                trend_point.poverty_rate,
                trend_point.resilience_score,
                trend_point.extreme_poverty_count
            ),
        ));

        info!(
            cycle,
            poverty_rate = trend_point.poverty_rate,
            resilience = trend_point.resilience_score,
            extreme = trend_point.extreme_poverty_count,
            households_exited,
            "Cycle complete"
        );

        CycleReport {
            cycle,
            trend_point,
            redistribution,
            households_exited,
            poverty_reduction,
        }
    }

    /// Aggregate metrics for the current population
    fn measure(&self, cycle: u64) -> PovertyTrendPoint {
        let households = self.registry.as_slice();
        if households.is_empty() {
            return PovertyTrendPoint {
                cycle,
                poverty_rate: 0.0,
                extreme_poverty_count: 0,
                resilience_score: scoring::resilience_score(households),
                avg_poverty_index: 0.0,
            };
        }

        let total = households.len() as f64;
        let high = households
            .iter()
            .filter(|h| h.poverty_index > HIGH_POVERTY_THRESHOLD)
            .count();
        let extreme = households
            .iter()
            .filter(|h| h.poverty_index > EXTREME_POVERTY_THRESHOLD)
            .count();
        let avg = scoring::mean_poverty_index(households);

        PovertyTrendPoint {
            cycle,
            poverty_rate: (high as f64 / total * 100.0).round(),
            extreme_poverty_count: extreme,
            resilience_score: scoring::resilience_score(households),
            avg_poverty_index: (avg * 100.0).round() / 100.0,
        }
    }
}
