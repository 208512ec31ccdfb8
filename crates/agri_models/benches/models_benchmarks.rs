//! Criterion benchmarks for agri_models generation and fitting.
//!
//! Measures historical generation across window lengths and the cost of
//! fitting and applying the yield model.

use agri_core::rng::SimRng;
use agri_models::generator::{HistoricalConfig, HistoricalSeriesGenerator};
use agri_models::processes::ProcessParameters;
use agri_models::regression::fit_yield_model;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generator(n_periods: usize) -> HistoricalSeriesGenerator {
    HistoricalSeriesGenerator::new(
        HistoricalConfig {
            start_year: 2000,
            n_periods,
        },
        ProcessParameters::default(),
    )
    .unwrap()
}

/// Benchmark historical dataset generation.
fn bench_historical_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("historical_generation");

    for periods in [25, 100, 1000] {
        let gen = generator(periods);
        group.bench_with_input(BenchmarkId::new("generate", periods), &gen, |b, gen| {
            let mut rng = SimRng::from_seed(123);
            b.iter(|| gen.generate(black_box(&mut rng)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark model fitting and prediction on generated history.
fn bench_yield_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("yield_model");

    for periods in [25, 1000] {
        let history = generator(periods)
            .generate(&mut SimRng::from_seed(7))
            .unwrap();

        group.bench_with_input(BenchmarkId::new("fit", periods), &history, |b, history| {
            b.iter(|| fit_yield_model(black_box(history)).unwrap());
        });

        let bundle = fit_yield_model(&history).unwrap();
        group.bench_with_input(
            BenchmarkId::new("predict", periods),
            &history,
            |b, history| {
                b.iter(|| bundle.predict(black_box(history)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_historical_generation, bench_yield_model);
criterion_main!(benches);
