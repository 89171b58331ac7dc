//! Outbox worker
//!
//! Drains published mirror events on a background task:
//! - Non-blocking publish (`try_send`), dropping on a full or closed channel
//! - Batching by size or flush interval
//! - Sequential delivery, so a sink sees events in publish order
//! - Failures counted and skipped, never retried

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use allocare_common::MirrorEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::sink::MirrorSink;
use crate::MirrorConfig;

/// Mirror counters
#[derive(Debug, Default)]
pub struct MirrorMetrics {
    pub events_published: AtomicU64,
    pub events_dropped: AtomicU64,
    pub events_delivered: AtomicU64,
    pub delivery_failures: AtomicU64,
    pub batches_flushed: AtomicU64,
}

impl MirrorMetrics {
    pub fn published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    pub fn delivered(&self) -> u64 {
        self.events_delivered.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.delivery_failures.load(Ordering::Relaxed)
    }
}

/// Publishing side of the mirror
#[derive(Clone)]
pub struct MirrorClient {
    event_tx: mpsc::Sender<MirrorEvent>,
    metrics: Arc<MirrorMetrics>,
}

impl MirrorClient {
    /// Publish one event without waiting
    pub fn publish(&self, event: MirrorEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {
                self.metrics.events_published.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.metrics.events_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(kind = event.kind(), "Mirror channel full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                self.metrics.events_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(kind = event.kind(), "Mirror worker stopped, dropping event");
            }
        }
    }

    /// Publish a sequence of events in order
    pub fn publish_all<I>(&self, events: I)
    where
        I: IntoIterator<Item = MirrorEvent>,
    {
        for event in events {
            self.publish(event);
        }
    }

    /// Shared counters
    pub fn metrics(&self) -> Arc<MirrorMetrics> {
        self.metrics.clone()
    }
}

impl std::fmt::Debug for MirrorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorClient")
            .field("published", &self.metrics.published())
            .field("dropped", &self.metrics.dropped())
            .finish()
    }
}

/// Background mirror worker
pub struct MirrorWorker;

impl MirrorWorker {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// The task exits once every [`MirrorClient`] clone is dropped and the
    /// remaining events are flushed.
    pub fn spawn<S>(config: &MirrorConfig, sink: S) -> (MirrorClient, JoinHandle<()>)
    where
        S: MirrorSink + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(config.channel_buffer.max(1));
        let metrics = Arc::new(MirrorMetrics::default());

        let handle = tokio::spawn(Self::run(
            config.clone(),
            event_rx,
            Arc::new(sink),
            metrics.clone(),
        ));

        (MirrorClient { event_tx, metrics }, handle)
    }

    async fn run(
        config: MirrorConfig,
        mut event_rx: mpsc::Receiver<MirrorEvent>,
        sink: Arc<dyn MirrorSink>,
        metrics: Arc<MirrorMetrics>,
    ) {
        let batch_size = config.batch_size.max(1);
        let mut pending: Vec<MirrorEvent> = Vec::with_capacity(batch_size);
        let flush_interval = tokio::time::Duration::from_millis(config.flush_interval_ms.max(1));
        let mut flush_timer = tokio::time::interval(flush_interval);

        loop {
            tokio::select! {
                event = event_rx.recv() => {
                    match event {
                        Some(e) => {
                            pending.push(e);

                            if pending.len() >= batch_size {
                                Self::flush(&*sink, std::mem::take(&mut pending), &metrics).await;
                            }
                        }
                        None => {
                            if !pending.is_empty() {
                                Self::flush(&*sink, std::mem::take(&mut pending), &metrics).await;
                            }
                            info!("Mirror channel closed, worker exiting");
                            break;
                        }
                    }
                }

                _ = flush_timer.tick() => {
                    if !pending.is_empty() {
                        Self::flush(&*sink, std::mem::take(&mut pending), &metrics).await;
                    }
                }
            }
        }
    }

    #[instrument(skip_all, fields(batch = batch.len()))]
    async fn flush(sink: &dyn MirrorSink, batch: Vec<MirrorEvent>, metrics: &MirrorMetrics) {
        for event in &batch {
            match sink.deliver(event).await {
                Ok(()) => {
                    metrics.events_delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    metrics.delivery_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(kind = event.kind(), error = %e, "Mirror delivery failed");
                }
            }
        }
        metrics.batches_flushed.fetch_add(1, Ordering::Relaxed);
        debug!("Flushed mirror batch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{InMemorySink, SinkError};
    use allocare_common::{LogRecord, LogType};
    use async_trait::async_trait;

    fn log_event(message: &str) -> MirrorEvent {
        MirrorEvent::Log(LogRecord {
            log_type: LogType::Info,
            message: message.to_string(),
            household_id: None,
        })
    }

    struct FailingSink;

    #[async_trait]
    impl MirrorSink for FailingSink {
        async fn deliver(&self, _event: &MirrorEvent) -> Result<(), SinkError> {
            Err(SinkError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_events_delivered_in_order() {
        let sink = InMemorySink::new();
        let (client, handle) = MirrorWorker::spawn(&MirrorConfig::default(), sink.clone());

        client.publish_all((0..5).map(|i| log_event(&format!("event {}", i))));
        let metrics = client.metrics();
        drop(client);
        handle.await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], log_event("event 0"));
        assert_eq!(events[4], log_event("event 4"));
        assert_eq!(metrics.delivered(), 5);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_propagated() {
        let (client, handle) = MirrorWorker::spawn(&MirrorConfig::default(), FailingSink);

        client.publish(log_event("lost"));
        client.publish(log_event("also lost"));
        let metrics = client.metrics();
        drop(client);
        handle.await.unwrap();

        assert_eq!(metrics.published(), 2);
        assert_eq!(metrics.failures(), 2);
        assert_eq!(metrics.delivered(), 0);
    }

    #[tokio::test]
    async fn test_full_channel_drops_without_blocking() {
        let config = MirrorConfig {
            channel_buffer: 1,
            ..MirrorConfig::default()
        };
        // Current-thread runtime: the worker cannot drain until we yield.
        let (client, handle) = MirrorWorker::spawn(&config, InMemorySink::new());

        client.publish(log_event("kept"));
        client.publish(log_event("dropped"));

        let metrics = client.metrics();
        assert_eq!(metrics.published(), 1);
        assert_eq!(metrics.dropped(), 1);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_after_worker_stopped() {
        let (client, handle) = MirrorWorker::spawn(&MirrorConfig::default(), InMemorySink::new());
        handle.abort();
        let _ = handle.await;

        client.publish(log_event("too late"));
        assert_eq!(client.metrics().dropped(), 1);
    }
}
