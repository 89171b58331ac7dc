//! AlloCare pilot binary
//!
//! Runs the three-cycle pilot against the seed community, mirrors every
//! event to the configured sink and prints the final snapshot summary.

use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allocare_common::VERSION;
use allocare_engine::{EngineConfig, Simulation, SimulationHandle};
use allocare_mirror::{HttpSink, MirrorWorker, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting AlloCare pilot v{}", VERSION);

    let config = EngineConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let (client, worker) = match (&config.mirror.endpoint, config.mirror.enabled) {
        (Some(endpoint), true) => {
            let timeout = Duration::from_millis(config.mirror.request_timeout_ms);
            let sink = HttpSink::new(endpoint.clone(), timeout)?;
            info!(endpoint = %sink.base_url(), "Mirroring to HTTP store");
            MirrorWorker::spawn(&config.mirror, sink)
        }
        (None, true) => {
            warn!("Mirror enabled without ALLOCARE_MIRROR_ENDPOINT, tracing events only");
            MirrorWorker::spawn(&config.mirror, TracingSink)
        }
        _ => MirrorWorker::spawn(&config.mirror, TracingSink),
    };
    let metrics = client.metrics();

    let handle = SimulationHandle::new(Simulation::new(&config), Some(client));
    let report = handle.run_pilot();

    for step in &report.rejected_steps {
        warn!("Rejected pilot step: {}", step);
    }
    info!(
        "Resilience {} -> {}, extreme poverty {} -> {} ({:.0}% reduction)",
        report.initial_resilience,
        report.final_resilience,
        report.initial_extreme_count,
        report.final_extreme_count,
        report.extreme_poverty_reduction()
    );

    if config.auto_cycle {
        info!(
            interval_ms = config.auto_cycle_interval_ms,
            "Auto-cycling until ctrl-c"
        );
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for ctrl-c");
            }
        };
        let ran = handle
            .run_auto_cycle_until(config.auto_cycle_interval(), shutdown)
            .await;
        info!(cycles = ran, "Auto-cycle finished");
    }

    let snapshot = handle.snapshot();
    let summary = serde_json::json!({
        "cycle": snapshot.cycle,
        "resilienceScore": snapshot.resilience_score,
        "totalPovertyReduction": snapshot.total_poverty_reduction,
        "householdsExitedThisCycle": snapshot.households_exited_this_cycle,
        "emergencyFundBalance": snapshot.emergency_fund_balance,
        "trend": snapshot.trend,
        "pilot": report,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    // Closing the last client lets the worker flush and exit
    drop(handle);
    worker.await?;
    info!(
        published = metrics.published(),
        delivered = metrics.delivered(),
        dropped = metrics.dropped(),
        failures = metrics.failures(),
        "Mirror drained"
    );

    Ok(())
}
