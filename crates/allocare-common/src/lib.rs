//! # AlloCare Common
//!
//! Shared types and constants for the AlloCare community resilience simulation.
//!
//! ## Core Types
//!
//! - [`Household`]: network node with credits, risk factors and derived poverty scores
//! - [`Task`]/[`Bid`]: allocatable work and household bids
//! - [`Transfer`], [`SystemLog`], [`PovertyTrendPoint`]: append-only records
//! - [`CecsJob`]: community engagement program jobs
//! - [`MirrorEvent`]: persistence mirror contract emitted by every operation
//!
//! ## Errors
//!
//! - [`AllocareError`]: infrastructure failures
//! - [`Rejection`]: validation no-ops of simulation operations

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AllocareError, Rejection, Result};
pub use types::{
    cecs::{CecsJob, JobCategory, JobStatus, JobTemplate, ProofKind},
    household::Household,
    ledger::{LogType, NetworkEdge, PovertyTrendPoint, SystemLog, Transfer},
    mirror::{
        BidRecord, HouseholdSnapshot, LogRecord, MirrorEvent, ShockRecord, TokenizationRecord,
        TransferRecord,
    },
    task::{Bid, Difficulty, Task, TaskStatus},
};

/// AlloCare version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Credits a household needs to cover basic survival
pub const SURVIVAL_THRESHOLD: f64 = 100.0;

/// Emergency floor enforced after every credit-reducing operation
pub const MINIMUM_CREDIT_FLOOR: f64 = 60.0;

/// Poverty index above which a household counts toward the poverty rate
pub const HIGH_POVERTY_THRESHOLD: f64 = 0.6;

/// Poverty index above which a household is in extreme poverty
pub const EXTREME_POVERTY_THRESHOLD: f64 = 0.75;

/// Poverty index above which a bid bypasses allocation (equity override)
pub const EQUITY_OVERRIDE_THRESHOLD: f64 = 0.7;

/// Poverty index below which a household is considered stable
pub const STABLE_POVERTY_THRESHOLD: f64 = 0.3;

/// Bid amount at which the bid component of the allocation score saturates
pub const BID_NORMALIZATION_CAP: f64 = 200.0;

/// Credits earned per tokenized labor hour
pub const CREDITS_PER_LABOR_HOUR: f64 = 10.0;
