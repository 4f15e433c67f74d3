//! Benchmark for the logistic regression fit and the seeded split
//!
//! Run with: cargo bench --bench fit_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use airlogit::pipeline::{sigmoid, train_test_split, LabeledData, LogisticRegression};

/// Generate survey-like ratings (0-5) with labels drawn from a known logistic curve
fn generate_ratings(n_rows: usize, seed: u64) -> LabeledData {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let ratings: Vec<f64> = (0..n_rows).map(|_| rng.gen_range(0..6) as f64).collect();
    let labels: Vec<f64> = ratings
        .iter()
        .map(|&r| {
            if rng.gen::<f64>() < sigmoid(1.1 * r - 3.5) {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    LabeledData::from_single_feature("Inflight entertainment", &ratings, &labels)
        .expect("ratings and labels have equal length")
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("logistic_fit");

    for &n_rows in &[1_000usize, 10_000, 100_000] {
        let data = generate_ratings(n_rows, 42);
        let estimator = LogisticRegression::default();

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &data, |b, data| {
            b.iter(|| {
                estimator
                    .fit(black_box(&data.features), black_box(&data.labels))
                    .expect("fit converges")
            })
        });
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_test_split");

    for &n_rows in &[10_000usize, 100_000] {
        let data = generate_ratings(n_rows, 7);

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &data, |b, data| {
            b.iter(|| train_test_split(black_box(data), 0.3, 42).expect("valid split"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_split);
criterion_main!(benches);
