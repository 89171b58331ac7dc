//! Core data types for the AlloCare simulation

pub mod cecs;
pub mod household;
pub mod ledger;
pub mod mirror;
pub mod task;
