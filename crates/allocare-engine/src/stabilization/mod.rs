//! Invariant enforcement after credit-reducing operations

pub mod floor;

pub use floor::{EmergencyFloor, FloorBoost, FloorReport};
