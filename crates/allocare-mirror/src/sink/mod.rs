//! Mirror sinks
//!
//! A sink receives outbox events one at a time. Implementations must be
//! idempotent under replay: every record carries its upsert key.

pub mod http;

use std::sync::Arc;

use allocare_common::MirrorEvent;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

/// Errors from sink delivery
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Store rejected {kind} event with status {status}")]
    Rejected { kind: &'static str, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Destination for mirrored simulation events
#[async_trait]
pub trait MirrorSink: Send + Sync {
    /// Deliver a single event
    async fn deliver(&self, event: &MirrorEvent) -> Result<(), SinkError>;
}

/// Sink that keeps every delivered event in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    events: Arc<RwLock<Vec<MirrorEvent>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all delivered events, in delivery order
    pub fn events(&self) -> Vec<MirrorEvent> {
        self.events.read().clone()
    }

    /// Number of delivered events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Count delivered events of a kind
    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.read().iter().filter(|e| e.kind() == kind).count()
    }
}

#[async_trait]
impl MirrorSink for InMemorySink {
    async fn deliver(&self, event: &MirrorEvent) -> Result<(), SinkError> {
        self.events.write().push(event.clone());
        Ok(())
    }
}

/// Sink that only traces events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl MirrorSink for TracingSink {
    async fn deliver(&self, event: &MirrorEvent) -> Result<(), SinkError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        debug!(kind = event.kind(), %payload, "Mirrored event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocare_common::{LogRecord, LogType};

    fn log_event(message: &str) -> MirrorEvent {
        MirrorEvent::Log(LogRecord {
            log_type: LogType::Info,
            message: message.to_string(),
            household_id: None,
        })
    }

    #[tokio::test]
    async fn test_in_memory_sink_records_in_order() {
        let sink = InMemorySink::new();
        sink.deliver(&log_event("first")).await.unwrap();
        sink.deliver(&log_event("second")).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], log_event("first"));
        assert_eq!(sink.count_kind("log"), 2);
        assert_eq!(sink.count_kind("shock"), 0);
    }

    #[tokio::test]
    async fn test_in_memory_sink_clones_share_storage() {
        let sink = InMemorySink::new();
        let handle = sink.clone();
        sink.deliver(&log_event("shared")).await.unwrap();
        assert_eq!(handle.len(), 1);
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_events() {
        assert!(TracingSink.deliver(&log_event("traced")).await.is_ok());
    }
}
