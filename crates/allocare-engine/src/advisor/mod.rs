//! Redistribution advisor
//!
//! - [`targeting`]: first-maximal selection rules shared by shock and advisor
//! - [`redistribution`]: donor/target pairing and amount policies

pub mod redistribution;
pub mod targeting;

pub use redistribution::{plan, relief_for, suggest, RedistributionPolicy, Suggestion};
pub use targeting::{first_max_by, select_shock_target};
