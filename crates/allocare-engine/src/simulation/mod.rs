//! Simulation state container
//!
//! [`Simulation`] owns the household registry, tasks, journals and CECS jobs.
//! Every mutating operation takes `&mut self` and is atomic: it either
//! returns a [`Rejection`](allocare_common::Rejection) with nothing changed,
//! or applies all of its effects before returning. Persistence events are
//! collected in an outbox and handed out by [`Simulation::drain_outbox`].

mod cecs;
mod cycle;
mod operations;

pub use cecs::JobPayout;
pub use cycle::CycleReport;
pub use operations::{BidOutcome, LaborReceipt, ShockReport};

use allocare_common::{
    CecsJob, Household, LogType, MirrorEvent, NetworkEdge, PovertyTrendPoint, SystemLog, Task,
    Transfer,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisor::{self, Suggestion};
use crate::config::EngineConfig;
use crate::journal::BoundedLog;
use crate::registry::HouseholdRegistry;
use crate::scoring;
use crate::seed;
use crate::stabilization::{EmergencyFloor, FloorReport};

/// In-memory simulation state
pub struct Simulation {
    registry: HouseholdRegistry,
    tasks: Vec<Task>,
    transfers: BoundedLog<Transfer>,
    logs: BoundedLog<SystemLog>,
    trend: BoundedLog<PovertyTrendPoint>,
    cecs_jobs: Vec<CecsJob>,
    cycle: u64,
    ai_redistribution_enabled: bool,
    emergency_fund_active: bool,
    emergency_fund_balance: f64,
    cash_disbursed: Decimal,
    households_exited_this_cycle: usize,
    total_poverty_reduction: f64,
    floor: EmergencyFloor,
    rng: ChaCha8Rng,
    outbox: Vec<MirrorEvent>,
}

impl Simulation {
    /// Seeded pilot community
    pub fn new(config: &EngineConfig) -> Self {
        let mut sim = Self::with_population(config, seed::households(), seed::tasks());
        sim.log(SystemLog::new(
            LogType::Info,
            "AlloCare initialized. Poverty Intelligence Engine active.",
        ));
        sim.log(SystemLog::new(
            LogType::Info,
            format!(
                "Monitoring {} households across community network.",
                sim.registry.len()
            ),
        ));
        sim.emit_households();
        info!(
            households = sim.registry.len(),
            tasks = sim.tasks.len(),
            "Simulation initialized"
        );
        sim
    }

    /// Custom population with empty journals and outbox
    pub fn with_population(
        config: &EngineConfig,
        households: Vec<Household>,
        tasks: Vec<Task>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            registry: HouseholdRegistry::new(households),
            tasks,
            transfers: BoundedLog::new(config.transfer_capacity),
            logs: BoundedLog::new(config.log_capacity),
            trend: BoundedLog::new(config.trend_capacity),
            cecs_jobs: Vec::new(),
            cycle: 1,
            ai_redistribution_enabled: config.ai_redistribution_enabled,
            emergency_fund_active: false,
            emergency_fund_balance: config.emergency_fund_balance,
            cash_disbursed: Decimal::ZERO,
            households_exited_this_cycle: 0,
            total_poverty_reduction: 0.0,
            floor: EmergencyFloor::default(),
            rng,
            outbox: Vec::new(),
        }
    }

    // ---- internal helpers ----

    /// Append a domain log entry and mirror it
    fn log(&mut self, entry: SystemLog) {
        self.outbox.push(MirrorEvent::Log((&entry).into()));
        self.logs.push(entry);
    }

    fn log_all(&mut self, entries: Vec<SystemLog>) {
        for entry in entries {
            self.log(entry);
        }
    }

    fn emit(&mut self, event: MirrorEvent) {
        self.outbox.push(event);
    }

    fn emit_households(&mut self) {
        let event = MirrorEvent::households(self.registry.iter());
        self.outbox.push(event);
    }

    /// Floor pass plus rescoring.
    ///
    /// The returned logs are not appended yet so callers can order them
    /// after the entry describing the operation.
    fn apply_floor(&mut self) -> FloorReport {
        let report = self.floor.apply(self.registry.as_mut_slice());
        if report.activated {
            debug!(
                households = report.boosts.len(),
                total_boost = report.total_boost(),
                "Emergency floor pass"
            );
        }
        self.registry.recalculate_all();
        report
    }

    fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    // ---- read accessors ----

    pub fn households(&self) -> &[Household] {
        self.registry.as_slice()
    }

    pub fn household(&self, id: &str) -> Option<&Household> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &HouseholdRegistry {
        &self.registry
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Oldest first
    pub fn transfers(&self) -> &BoundedLog<Transfer> {
        &self.transfers
    }

    /// Oldest first
    pub fn logs(&self) -> &BoundedLog<SystemLog> {
        &self.logs
    }

    pub fn trend(&self) -> &BoundedLog<PovertyTrendPoint> {
        &self.trend
    }

    pub fn cecs_jobs(&self) -> &[CecsJob] {
        &self.cecs_jobs
    }

    /// Next cycle number to run
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn ai_redistribution_enabled(&self) -> bool {
        self.ai_redistribution_enabled
    }

    /// Whether the floor fired during the most recent credit-reducing operation
    pub fn emergency_fund_active(&self) -> bool {
        self.emergency_fund_active
    }

    pub fn emergency_fund_balance(&self) -> f64 {
        self.emergency_fund_balance
    }

    /// Cash paid out through verified CECS jobs
    pub fn cash_disbursed(&self) -> Decimal {
        self.cash_disbursed
    }

    pub fn households_exited_this_cycle(&self) -> usize {
        self.households_exited_this_cycle
    }

    pub fn total_poverty_reduction(&self) -> f64 {
        self.total_poverty_reduction
    }

    pub fn resilience_score(&self) -> u32 {
        scoring::resilience_score(self.registry.as_slice())
    }

    /// Advisory transfer for the current state
    pub fn ai_suggestion(&self) -> Option<Suggestion> {
        advisor::suggest(self.registry.as_slice())
    }

    pub fn network_edges(&self) -> Vec<NetworkEdge> {
        self.registry.network_edges()
    }

    /// Take all pending persistence events, oldest first
    pub fn drain_outbox(&mut self) -> Vec<MirrorEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_events(&self) -> usize {
        self.outbox.len()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            cycle: self.cycle,
            households: self.registry.as_slice().to_vec(),
            tasks: self.tasks.clone(),
            transfers: self.transfers.to_vec(),
            logs: self.logs.to_vec(),
            trend: self.trend.to_vec(),
            cecs_jobs: self.cecs_jobs.clone(),
            network_edges: self.network_edges(),
            ai_redistribution_enabled: self.ai_redistribution_enabled,
            emergency_fund_active: self.emergency_fund_active,
            emergency_fund_balance: self.emergency_fund_balance,
            cash_disbursed: self.cash_disbursed,
            households_exited_this_cycle: self.households_exited_this_cycle,
            total_poverty_reduction: self.total_poverty_reduction,
            resilience_score: self.resilience_score(),
            ai_suggestion: self.ai_suggestion(),
        }
    }

    // ---- simple mutations ----

    /// Rescore every household and mirror the population
    pub fn recalculate_all(&mut self) {
        self.registry.recalculate_all();
        self.emit_households();
    }

    /// Append an externally authored log entry
    pub fn add_log(
        &mut self,
        log_type: LogType,
        message: impl Into<String>,
        household_id: Option<String>,
    ) {
        let mut entry = SystemLog::new(log_type, message);
        entry.household_id = household_id;
        self.log(entry);
    }
}

/// Serializable copy of the full simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub cycle: u64,
    pub households: Vec<Household>,
    pub tasks: Vec<Task>,
    pub transfers: Vec<Transfer>,
    pub logs: Vec<SystemLog>,
    pub trend: Vec<PovertyTrendPoint>,
    pub cecs_jobs: Vec<CecsJob>,
    pub network_edges: Vec<NetworkEdge>,
    pub ai_redistribution_enabled: bool,
    pub emergency_fund_active: bool,
    pub emergency_fund_balance: f64,
    pub cash_disbursed: Decimal,
    pub households_exited_this_cycle: usize,
    pub total_poverty_reduction: f64,
    pub resilience_score: u32,
    pub ai_suggestion: Option<Suggestion>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn config() -> EngineConfig {
        EngineConfig {
            rng_seed: Some(7),
            ..EngineConfig::default()
        }
    }

    pub fn seeded() -> Simulation {
        let mut sim = Simulation::new(&config());
        sim.drain_outbox();
        sim
    }
}
