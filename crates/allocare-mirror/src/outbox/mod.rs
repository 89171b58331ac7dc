//! Outbox module
//!
//! - MirrorClient: non-blocking publisher handed to the simulation
//! - MirrorWorker: background task delivering batches to a sink

pub mod worker;

pub use worker::{MirrorClient, MirrorMetrics, MirrorWorker};
