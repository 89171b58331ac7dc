//! Human-readable poverty classifications

use allocare_common::{
    Household, CREDITS_PER_LABOR_HOUR, EXTREME_POVERTY_THRESHOLD, HIGH_POVERTY_THRESHOLD,
    STABLE_POVERTY_THRESHOLD, SURVIVAL_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Poverty band of a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PovertyBand {
    /// PI < 0.3
    Stable,
    /// 0.3 <= PI < 0.6
    Vulnerable,
    /// 0.6 <= PI < 0.75
    HighRisk,
    /// PI >= 0.75
    Extreme,
}

impl PovertyBand {
    pub fn from_index(poverty_index: f64) -> Self {
        if poverty_index < STABLE_POVERTY_THRESHOLD {
            PovertyBand::Stable
        } else if poverty_index < HIGH_POVERTY_THRESHOLD {
            PovertyBand::Vulnerable
        } else if poverty_index < EXTREME_POVERTY_THRESHOLD {
            PovertyBand::HighRisk
        } else {
            PovertyBand::Extreme
        }
    }
}

impl std::fmt::Display for PovertyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PovertyBand::Stable => write!(f, "Stable"),
            PovertyBand::Vulnerable => write!(f, "Vulnerable"),
            PovertyBand::HighRisk => write!(f, "High Risk"),
            PovertyBand::Extreme => write!(f, "Extreme Poverty"),
        }
    }
}

/// Estimated time to reach the survival threshold through labor income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ExitEstimate {
    AlreadyStable,
    UnderAWeek,
    Weeks(u32),
    Months(u32),
}

impl std::fmt::Display for ExitEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitEstimate::AlreadyStable => write!(f, "Already stable"),
            ExitEstimate::UnderAWeek => write!(f, "< 1 week"),
            ExitEstimate::Weeks(1) => write!(f, "1 week"),
            ExitEstimate::Weeks(n) => write!(f, "{} weeks", n),
            ExitEstimate::Months(1) => write!(f, "1 month"),
            ExitEstimate::Months(n) => write!(f, "{} months", n),
        }
    }
}

/// Weeks of labor (one tokenized hour per week) to cover the credit shortfall
pub fn time_to_exit_poverty(household: &Household) -> ExitEstimate {
    if household.poverty_index < STABLE_POVERTY_THRESHOLD {
        return ExitEstimate::AlreadyStable;
    }
    let credits_needed = (SURVIVAL_THRESHOLD - household.credits).max(0.0);
    let weeks = (credits_needed / CREDITS_PER_LABOR_HOUR).ceil() as u32;
    match weeks {
        0 => ExitEstimate::UnderAWeek,
        1..=4 => ExitEstimate::Weeks(weeks),
        _ => ExitEstimate::Months(weeks.div_ceil(4)),
    }
}
