//! Poverty scoring: PI = 0.4·CDR + 0.2·instability + 0.2·dependency + 0.2·shock
//!
//! All functions are pure. Derived household fields are always a function
//! of credits and the three risk factors alone.

use allocare_common::{Household, BID_NORMALIZATION_CAP, SURVIVAL_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Weight of the credit deficit ratio in the poverty index
pub const CREDIT_DEFICIT_WEIGHT: f64 = 0.4;
/// Weight of income instability in the poverty index
pub const INCOME_INSTABILITY_WEIGHT: f64 = 0.2;
/// Weight of the dependency ratio in the poverty index
pub const DEPENDENCY_WEIGHT: f64 = 0.2;
/// Weight of shock exposure in the poverty index
pub const SHOCK_EXPOSURE_WEIGHT: f64 = 0.2;

/// Allocation score weights: bid, centrality, poverty
pub const ALLOCATION_BID_WEIGHT: f64 = 0.4;
pub const ALLOCATION_CENTRALITY_WEIGHT: f64 = 0.2;
pub const ALLOCATION_POVERTY_WEIGHT: f64 = 0.4;

/// Derived scores of a single household
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PovertyScore {
    pub poverty_index: f64,
    pub credit_deficit_ratio: f64,
}

#[inline]
fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Normalized shortfall below the survival threshold
pub fn credit_deficit_ratio(credits: f64) -> f64 {
    clamp01((SURVIVAL_THRESHOLD - credits).max(0.0) / SURVIVAL_THRESHOLD)
}

/// Weighted poverty index, forced into [0, 1]
pub fn poverty_index(
    credit_deficit_ratio: f64,
    income_instability: f64,
    dependency_ratio: f64,
    shock_exposure: f64,
) -> f64 {
    clamp01(
        CREDIT_DEFICIT_WEIGHT * credit_deficit_ratio
            + INCOME_INSTABILITY_WEIGHT * income_instability
            + DEPENDENCY_WEIGHT * dependency_ratio
            + SHOCK_EXPOSURE_WEIGHT * shock_exposure,
    )
}

/// Score a household from its credits and risk factors
pub fn score(household: &Household) -> PovertyScore {
    let credit_deficit_ratio = credit_deficit_ratio(household.credits);
    PovertyScore {
        poverty_index: poverty_index(
            credit_deficit_ratio,
            household.income_instability_score,
            household.dependency_ratio,
            household.shock_exposure_risk,
        ),
        credit_deficit_ratio,
    }
}

/// Overwrite a household's derived fields with a fresh score
pub fn apply(household: &mut Household) -> PovertyScore {
    let fresh = score(household);
    household.poverty_index = fresh.poverty_index;
    household.credit_deficit_ratio = fresh.credit_deficit_ratio;
    fresh
}

/// Community resilience: `max(0, round(100 - 100·mean(PI)))`, 100 when empty
pub fn resilience_score(households: &[Household]) -> u32 {
    if households.is_empty() {
        return 100;
    }
    let mean = mean_poverty_index(households);
    (100.0 - mean * 100.0).round().max(0.0) as u32
}

/// Mean poverty index, 0 for an empty population
pub fn mean_poverty_index(households: &[Household]) -> f64 {
    if households.is_empty() {
        return 0.0;
    }
    households.iter().map(|h| h.poverty_index).sum::<f64>() / households.len() as f64
}

/// Bid ranking score. Bids above the normalization cap earn no extra weight.
pub fn allocation_score(bid: f64, centrality_score: f64, poverty_index: f64) -> f64 {
    let normalized_bid = (bid / BID_NORMALIZATION_CAP).min(1.0);
    ALLOCATION_BID_WEIGHT * normalized_bid
        + ALLOCATION_CENTRALITY_WEIGHT * centrality_score
        + ALLOCATION_POVERTY_WEIGHT * poverty_index
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn fatima() -> Household {
        Household::new("h5", "Fatima Begum", "Sector-A1")
            .with_credits(15.0)
            .with_risk(0.95, 0.9, 0.85)
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = CREDIT_DEFICIT_WEIGHT
            + INCOME_INSTABILITY_WEIGHT
            + DEPENDENCY_WEIGHT
            + SHOCK_EXPOSURE_WEIGHT;
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_credit_deficit_ratio() {
        assert!((credit_deficit_ratio(15.0) - 0.85).abs() < EPS);
        assert_eq!(credit_deficit_ratio(100.0), 0.0);
        assert_eq!(credit_deficit_ratio(250.0), 0.0);
        assert_eq!(credit_deficit_ratio(0.0), 1.0);
    }

    #[test]
    fn test_extreme_poverty_household() {
        let s = score(&fatima());
        assert!((s.credit_deficit_ratio - 0.85).abs() < EPS);
        assert!((s.poverty_index - 0.88).abs() < EPS);
    }

    #[test]
    fn test_poverty_index_clamped() {
        assert_eq!(poverty_index(1.0, 2.0, 2.0, 2.0), 1.0);
        assert_eq!(poverty_index(0.0, -1.0, -1.0, -1.0), 0.0);
    }

    #[test]
    fn test_apply_overwrites_derived_fields() {
        let mut h = fatima();
        h.poverty_index = 0.1;
        apply(&mut h);
        assert!((h.poverty_index - 0.88).abs() < EPS);
        assert!((h.credit_deficit_ratio - 0.85).abs() < EPS);
    }

    #[test]
    fn test_resilience_score() {
        assert_eq!(resilience_score(&[]), 100);

        let mut a = Household::new("a", "A", "S");
        let mut b = Household::new("b", "B", "S");
        a.poverty_index = 0.2;
        b.poverty_index = 0.6;
        assert_eq!(resilience_score(&[a.clone(), b.clone()]), 60);

        a.poverty_index = 1.0;
        b.poverty_index = 1.0;
        assert_eq!(resilience_score(&[a, b]), 0);
    }

    #[test]
    fn test_allocation_score() {
        // 0.4·(100/200) + 0.2·0.5 + 0.4·0.5
        assert!((allocation_score(100.0, 0.5, 0.5) - 0.5).abs() < EPS);
        // bid saturates at the cap
        assert!((allocation_score(200.0, 0.0, 0.0) - allocation_score(5000.0, 0.0, 0.0)).abs() < EPS);
    }
}
