//! Rule-based redistribution advisor
//!
//! Target: the household with the highest poverty index above the equity
//! override threshold. Donor: among the others with PI < 0.4 and
//! credits > 50, the one holding the most credits. Stateless; callers
//! re-evaluate after every state change.

use allocare_common::{Household, EQUITY_OVERRIDE_THRESHOLD};
use serde::{Deserialize, Serialize};

use super::targeting::first_max_by;

/// Donor must be below this poverty index
pub const DONOR_MAX_POVERTY: f64 = 0.4;

/// Donor must hold more than this many credits
pub const DONOR_MIN_CREDITS: f64 = 50.0;

/// Amount rule: `min(max_amount, floor(donor.credits · rate))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedistributionPolicy {
    pub max_amount: f64,
    pub rate: f64,
}

impl RedistributionPolicy {
    /// Advisory suggestion
    pub const SUGGESTION: Self = Self {
        max_amount: 30.0,
        rate: 0.2,
    };

    /// Automatic relief after a shock
    pub const SHOCK_RELIEF: Self = Self {
        max_amount: 30.0,
        rate: 0.2,
    };

    /// Automatic step at the start of a cycle
    pub const CYCLE: Self = Self {
        max_amount: 25.0,
        rate: 0.15,
    };

    pub fn amount_for(&self, donor_credits: f64) -> f64 {
        (donor_credits * self.rate).floor().min(self.max_amount)
    }
}

/// Proposed donor -> recipient transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
}

/// Highest-poverty household above the equity override threshold
pub fn select_target(households: &[Household]) -> Option<&Household> {
    first_max_by(
        households
            .iter()
            .filter(|h| h.poverty_index > EQUITY_OVERRIDE_THRESHOLD),
        |h| h.poverty_index,
    )
}

/// Richest low-poverty household other than `exclude_id`
pub fn select_donor<'a>(households: &'a [Household], exclude_id: &str) -> Option<&'a Household> {
    first_max_by(
        households.iter().filter(|h| {
            h.id != exclude_id
                && h.poverty_index < DONOR_MAX_POVERTY
                && h.credits > DONOR_MIN_CREDITS
        }),
        |h| h.credits,
    )
}

/// Donor/target pair and amount under a policy
pub fn plan(households: &[Household], policy: RedistributionPolicy) -> Option<Suggestion> {
    let target = select_target(households)?;
    relief_for(households, &target.id, policy)
}

/// Donor and amount for a fixed recipient
pub fn relief_for(
    households: &[Household],
    recipient_id: &str,
    policy: RedistributionPolicy,
) -> Option<Suggestion> {
    let donor = select_donor(households, recipient_id)?;
    Some(Suggestion {
        from_id: donor.id.clone(),
        to_id: recipient_id.to_string(),
        amount: policy.amount_for(donor.credits),
    })
}

/// Advisory suggestion
pub fn suggest(households: &[Household]) -> Option<Suggestion> {
    plan(households, RedistributionPolicy::SUGGESTION)
}
