//! Error types for AlloCare
//!
//! Two families live here:
//! - [`AllocareError`]: infrastructure failures (configuration, serialization,
//!   mirror transport). These are the only errors that use `Result` plumbing.
//! - [`Rejection`]: validation no-ops of simulation operations. A rejected
//!   operation leaves the simulation state untouched.

use thiserror::Error;

/// Result type alias using AllocareError
pub type Result<T> = std::result::Result<T, AllocareError>;

/// Unified error type for AlloCare infrastructure
#[derive(Debug, Error)]
pub enum AllocareError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Persistence mirror errors
    #[error("Mirror error: {0}")]
    Mirror(String),

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reason an operation was ignored.
///
/// Rejections are values, not failures: the caller may inspect them for
/// user-facing feedback or drop them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    #[error("Household not found: {0}")]
    UnknownHousehold(String),

    #[error("Task not found: {0}")]
    UnknownTask(String),

    #[error("CECS job not found: {0}")]
    UnknownJob(String),

    #[error("Task {task_id} is not open (status: {status})")]
    TaskNotOpen { task_id: String, status: String },

    #[error("Task {0} is not allocated")]
    TaskNotAllocated(String),

    #[error("Insufficient credits: required {required}, available {available}")]
    InsufficientCredits { required: f64, available: f64 },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Cannot transfer credits to the same household")]
    SelfTransfer,

    #[error("Household {household_id} has no bid on task {task_id}")]
    NoBidFromHousehold {
        task_id: String,
        household_id: String,
    },

    #[error("No household qualifies as a shock target")]
    NoShockCandidate,

    #[error("CECS job {0} is not active")]
    JobNotActive(String),

    #[error("CECS job {0} has no verified submission")]
    JobNotVerified(String),
}

impl From<serde_json::Error> for AllocareError {
    fn from(err: serde_json::Error) -> Self {
        AllocareError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for AllocareError {
    fn from(err: anyhow::Error) -> Self {
        AllocareError::Internal(err.to_string())
    }
}
