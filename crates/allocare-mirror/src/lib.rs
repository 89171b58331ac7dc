//! # AlloCare Mirror
//!
//! Best-effort persistence for the simulation outbox.
//!
//! ```text
//! Simulation ──drain_outbox()──▶ MirrorClient ──try_send──▶ channel
//!                                                              │
//!                                   MirrorWorker (batching) ◀──┘
//!                                              │
//!                                     MirrorSink::deliver
//!                              (InMemory / Tracing / Http)
//! ```
//!
//! Publishing never blocks and never fails from the caller's point of view:
//! a full or closed channel drops the event, and a sink error is counted and
//! skipped. The next successful households snapshot carries the latest state
//! forward, so nothing is retried.

pub mod outbox;
pub mod sink;

pub use outbox::{MirrorClient, MirrorMetrics, MirrorWorker};
pub use sink::{http::HttpSink, InMemorySink, MirrorSink, SinkError, TracingSink};

use serde::{Deserialize, Serialize};

/// Mirror configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Publish outbox events at all
    pub enabled: bool,
    /// Base URL of the REST store (e.g. "http://localhost:4000/api")
    pub endpoint: Option<String>,
    /// Channel buffer size
    pub channel_buffer: usize,
    /// Maximum events per delivered batch
    pub batch_size: usize,
    /// Flush interval in milliseconds
    pub flush_interval_ms: u64,
    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            channel_buffer: 1024,
            batch_size: 32,
            flush_interval_ms: 250,
            request_timeout_ms: 2000,
        }
    }
}
