//! Serialized access to a shared simulation
//!
//! Every mutation runs under one mutex, so operations and cycle ticks never
//! interleave. Outbox events are drained while the lock is held and
//! published after it is released; publishing never blocks.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use allocare_common::{MirrorEvent, Rejection, Transfer};
use allocare_mirror::MirrorClient;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::pilot::{self, PilotReport};
use crate::simulation::{
    BidOutcome, CycleReport, LaborReceipt, ShockReport, Simulation, SimulationSnapshot,
};

/// Cloneable handle to a simulation and its mirror
#[derive(Clone)]
pub struct SimulationHandle {
    inner: Arc<Mutex<Simulation>>,
    mirror: Option<MirrorClient>,
}

impl SimulationHandle {
    pub fn new(simulation: Simulation, mirror: Option<MirrorClient>) -> Self {
        let handle = Self {
            inner: Arc::new(Mutex::new(simulation)),
            mirror,
        };
        // Flush events produced during construction
        handle.apply(|_| ());
        handle
    }

    /// Run a mutation under the lock, then publish its events
    pub fn apply<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        let (result, events) = {
            let mut sim = self.inner.lock();
            let result = f(&mut *sim);
            (result, sim.drain_outbox())
        };
        self.publish(events);
        result
    }

    /// Run a read-only closure under the lock
    pub fn read<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        let sim = self.inner.lock();
        f(&*sim)
    }

    fn publish(&self, events: Vec<MirrorEvent>) {
        if events.is_empty() {
            return;
        }
        match &self.mirror {
            Some(client) => client.publish_all(events),
            None => debug!(count = events.len(), "Mirror disabled, discarding events"),
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.read(Simulation::snapshot)
    }

    pub fn transfer_credits(
        &self,
        from_id: &str,
        to_id: &str,
        amount: f64,
        ai_suggested: bool,
    ) -> Result<Transfer, Rejection> {
        self.apply(|sim| sim.transfer_credits(from_id, to_id, amount, ai_suggested))
    }

    pub fn tokenize_labor(
        &self,
        household_id: &str,
        hours: f64,
    ) -> Result<LaborReceipt, Rejection> {
        self.apply(|sim| sim.tokenize_labor(household_id, hours))
    }

    pub fn submit_bid(
        &self,
        task_id: &str,
        household_id: &str,
        amount: f64,
    ) -> Result<BidOutcome, Rejection> {
        self.apply(|sim| sim.submit_bid(task_id, household_id, amount))
    }

    pub fn simulate_shock(&self) -> Result<ShockReport, Rejection> {
        self.apply(Simulation::simulate_shock)
    }

    pub fn run_cycle(&self) -> CycleReport {
        self.apply(Simulation::run_cycle)
    }

    pub fn run_pilot(&self) -> PilotReport {
        self.apply(pilot::run_pilot)
    }

    /// Drive `run_cycle` on a fixed interval until the task is aborted.
    ///
    /// The first tick fires after one full interval. Late ticks are skipped.
    pub fn spawn_auto_cycle(&self, interval: Duration) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(interval_ms = interval.as_millis() as u64, "Auto-cycle started");
            loop {
                ticker.tick().await;
                let report = handle.run_cycle();
                debug!(cycle = report.cycle, "Auto-cycle tick");
            }
        })
    }

    /// Auto-cycle until `shutdown` resolves; returns the number of cycles run
    pub async fn run_auto_cycle_until<F>(&self, interval: Duration, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let first = self.read(Simulation::cycle);
        let task = self.spawn_auto_cycle(interval);
        shutdown.await;
        task.abort();
        let _ = task.await;

        let ran = self.read(Simulation::cycle) - first;
        info!(cycles = ran, "Auto-cycle stopped");
        ran
    }
}
