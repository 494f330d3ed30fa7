//! Benchmarks for phase estimation
//!
//! Run with: cargo bench -p qpe-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use qpe_adapter_sim::SimulatorBackend;
use qpe_core::{QpeEngine, RawParameters};

/// Benchmark circuit construction across register widths
fn bench_build_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_circuit");
    let engine = QpeEngine::default();

    for precision in &[2i64, 4, 8, 12, 16] {
        let params = engine
            .validate(&RawParameters::new(0.3, "rotation", *precision))
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("rotation", precision),
            &params,
            |b, params| {
                b.iter(|| engine.build(black_box(params)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark a full request on the seeded simulator
fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let engine = QpeEngine::default();
    let backend = SimulatorBackend::new().with_seed(1);

    for precision in &[4i64, 8, 12] {
        let raw = RawParameters::new(0.3, "rotation", *precision).with_measurements(1000);
        group.bench_with_input(BenchmarkId::new("simulator", precision), &raw, |b, raw| {
            b.iter(|| {
                runtime
                    .block_on(engine.estimate(&backend, black_box(raw)))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_circuit, bench_estimate);
criterion_main!(benches);
