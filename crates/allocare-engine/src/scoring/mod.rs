//! Poverty scoring
//!
//! - [`poverty`]: pure index, resilience and allocation formulas
//! - [`bands`]: band labels and time-to-exit estimates

pub mod bands;
pub mod poverty;

pub use bands::{time_to_exit_poverty, ExitEstimate, PovertyBand};
pub use poverty::{
    allocation_score, credit_deficit_ratio, mean_poverty_index, poverty_index, resilience_score,
    score, PovertyScore,
};
