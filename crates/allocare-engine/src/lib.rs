//! # AlloCare Engine
//!
//! Poverty scoring and cycle simulation for a community resilience network.
//!
//! ## Poverty Index
//!
//! ```text
//! PI = 0.4 × CDR + 0.2 × instability + 0.2 × dependency + 0.2 × shock
//! CDR = max(0, 100 - credits) / 100
//! ```
//!
//! ## Cycle
//!
//! Detect → Prioritize → Allocate → Stabilize → Recalculate. Each tick
//! optionally redistributes credits, applies organic drift, rescores every
//! household and appends a trend point.
//!
//! ## Stabilization
//!
//! No household's credits stay below 60 after a credit-reducing operation.

pub mod advisor;
pub mod config;
pub mod handle;
pub mod journal;
pub mod pilot;
pub mod registry;
pub mod scoring;
pub mod seed;
pub mod simulation;
pub mod stabilization;

pub use advisor::{RedistributionPolicy, Suggestion};
pub use config::EngineConfig;
pub use handle::SimulationHandle;
pub use journal::BoundedLog;
pub use pilot::{run_pilot, PilotReport};
pub use registry::HouseholdRegistry;
pub use scoring::{ExitEstimate, PovertyBand, PovertyScore};
pub use simulation::{
    BidOutcome, CycleReport, JobPayout, LaborReceipt, ShockReport, Simulation, SimulationSnapshot,
};
pub use stabilization::{EmergencyFloor, FloorReport};
