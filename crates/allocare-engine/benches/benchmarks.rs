//! AlloCare engine benchmarks
//!
//! - Poverty scoring over growing populations
//! - Advisor suggestion lookup
//! - Full cycle tick
//! - Shock with automatic relief

use allocare_common::Household;
use allocare_engine::{advisor, scoring, EngineConfig, Simulation};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn config() -> EngineConfig {
    EngineConfig {
        rng_seed: Some(2024),
        ai_redistribution_enabled: true,
        ..EngineConfig::default()
    }
}

/// Synthetic community with a spread of credits and risks
fn community(size: usize) -> Vec<Household> {
    (0..size)
        .map(|i| {
            let spread = (i % 10) as f64 / 10.0;
            Household::new(format!("h{i}"), format!("Household {i}"), "Sector-Bench")
                .with_credits(20.0 + 15.0 * (i % 12) as f64)
                .with_labor_hours(5.0 + spread * 20.0)
                .with_risk(spread, 1.0 - spread, (spread + 0.35).min(1.0))
                .with_centrality(0.5)
        })
        .collect()
}

// ============ SCORING BENCHMARKS ============

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    group.measurement_time(Duration::from_secs(5));

    for size in [5usize, 100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let mut households = community(*size);

        group.bench_with_input(BenchmarkId::new("recalculate", size), size, |b, _| {
            b.iter(|| {
                for h in households.iter_mut() {
                    black_box(scoring::poverty::apply(h));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("resilience", size), size, |b, _| {
            b.iter(|| black_box(scoring::resilience_score(black_box(&households))));
        });
    }

    group.finish();
}

// ============ ADVISOR BENCHMARKS ============

fn bench_advisor(c: &mut Criterion) {
    let mut group = c.benchmark_group("advisor");

    for size in [5usize, 1_000, 10_000].iter() {
        let mut households = community(*size);
        households.iter_mut().for_each(|h| {
            scoring::poverty::apply(h);
        });

        group.bench_with_input(BenchmarkId::new("suggest", size), size, |b, _| {
            b.iter(|| black_box(advisor::suggest(black_box(&households))));
        });
    }

    group.finish();
}

// ============ CYCLE BENCHMARKS ============

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("seed_population", |b| {
        let mut sim = Simulation::new(&config());
        b.iter(|| {
            let report = sim.run_cycle();
            sim.drain_outbox();
            black_box(report)
        });
    });

    for size in [100usize, 1_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("population", size), size, |b, &size| {
            let mut sim = Simulation::with_population(&config(), community(size), Vec::new());
            b.iter(|| {
                let report = sim.run_cycle();
                sim.drain_outbox();
                black_box(report)
            });
        });
    }

    group.finish();
}

// ============ SHOCK BENCHMARKS ============

fn bench_shock(c: &mut Criterion) {
    let mut group = c.benchmark_group("shock");

    group.bench_function("with_relief", |b| {
        b.iter_batched(
            || Simulation::with_population(&config(), community(100), Vec::new()),
            |mut sim| black_box(sim.simulate_shock()),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_advisor, bench_cycle, bench_shock);
criterion_main!(benches);
