mod common;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rayon::prelude::*;
use tokio::runtime::Runtime;
use wallet::prelude::*;

/// Blocking aggregator across worker counts
fn bench_simple_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_sum");

    for len in [10_000, 400_000] {
        let amounts = common::amounts(len);
        group.throughput(Throughput::Elements(len as u64));

        for workers in [1, 2, 4, 8] {
            let aggregator = Aggregator::with_workers(workers);
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), len),
                &amounts,
                |b, amounts| b.iter(|| black_box(aggregator.simple_sum(amounts).unwrap())),
            );
        }
    }

    group.finish();
}

/// Cost of the progress sink on top of the plain sum
fn bench_sum_with_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_with_progress");
    let amounts = common::amounts(400_000);

    for workers in [1, 4, 8] {
        let aggregator = Aggregator::with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &amounts, |b, amounts| {
            b.iter(|| {
                let mut events = 0;
                let total = aggregator
                    .sum_with_progress(amounts, |_| events += 1)
                    .unwrap();
                black_box((total, events))
            })
        });
    }

    group.finish();
}

/// Async pull stream on tokio's blocking pool
fn bench_progress_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("progress_stream");
    let rt = Runtime::new().unwrap();
    let amounts = common::shared_amounts(400_000);

    for workers in [1, 4, 8] {
        let aggregator = Aggregator::with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &amounts, |b, amounts| {
            b.to_async(&rt).iter(|| async {
                black_box(
                    aggregator
                        .progress_stream(amounts.clone())
                        .into_total()
                        .await
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Baselines: sequential fold and rayon's work-stealing sum
fn bench_baselines(c: &mut Criterion) {
    let mut group = c.benchmark_group("baselines");
    let amounts = common::amounts(400_000);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(amounts.iter().copied().sum::<Money>()))
    });

    group.bench_function("rayon", |b| {
        b.iter(|| {
            black_box(
                amounts
                    .par_iter()
                    .map(|amount| amount.minor())
                    .sum::<i64>(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_sum,
    bench_sum_with_progress,
    bench_progress_stream,
    bench_baselines
);
criterion_main!(benches);
