//! Benchmark for the collection engine.
//!
//! Compares kollect operations against hand-written iterator code over the
//! same `serde_json` values, and measures the cost of the deferred path.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kollect::collect::*;
use kollect::math::sum;
use kollect::{Deferred, pipe};
use serde_json::{Value, json};
use std::hint::black_box;

fn numbers(size: usize) -> Value {
    json!((0..size).collect::<Vec<_>>())
}

fn records(size: usize) -> Value {
    json!(
        (0..size)
            .map(|index| json!({ "id": index, "roles": [{ "name": format!("role-{index}") }] }))
            .collect::<Vec<_>>()
    )
}

// =============================================================================
// map vs Iterator::map
// =============================================================================

fn benchmark_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map");

    for size in [100, 1000, 10000] {
        let data = numbers(size);
        let double = map(|item: &Value, _| item.as_i64().unwrap_or_default() * 2);

        group.bench_with_input(BenchmarkId::new("kollect", size), &data, |bencher, data| {
            bencher.iter(|| black_box(double.apply(data)));
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &data, |bencher, data| {
            bencher.iter(|| {
                let doubled: Vec<Value> = data
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|item| json!(item.as_i64().unwrap_or_default() * 2))
                    .collect();
                black_box(doubled)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Pipelines
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline");

    for size in [100, 1000, 10000] {
        let data = numbers(size);

        group.bench_with_input(
            BenchmarkId::new("filter_chunk_flat", size),
            &data,
            |bencher, data| {
                bencher.iter(|| {
                    black_box(pipe!(
                        data,
                        filter().by(|item: &Value, _| item.as_i64().unwrap_or_default() % 3 == 0),
                        chunk(16),
                        flat()
                    ))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("sum", size), &data, |bencher, data| {
            bencher.iter(|| black_box(sum().apply(data)));
        });
    }

    group.finish();
}

// =============================================================================
// Paths
// =============================================================================

fn benchmark_paths(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("paths");

    for size in [100, 1000] {
        let data = records(size);

        group.bench_with_input(
            BenchmarkId::new("pluck_wildcard", size),
            &data,
            |bencher, data| {
                bencher.iter(|| black_box(pluck("roles.*.name").apply(data)));
            },
        );

        group.bench_with_input(BenchmarkId::new("key_map", size), &data, |bencher, data| {
            bencher.iter(|| black_box(key_map().apply(data)));
        });
    }

    group.finish();
}

// =============================================================================
// Deferred overhead
// =============================================================================

fn benchmark_deferred(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("deferred");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for size in [100, 1000] {
        let data = numbers(size);
        let double = map(|item: &Value, _| item.as_i64().unwrap_or_default() * 2);

        group.bench_with_input(BenchmarkId::new("sync", size), &data, |bencher, data| {
            bencher.iter(|| black_box(double.apply(data)));
        });

        group.bench_with_input(BenchmarkId::new("deferred", size), &data, |bencher, data| {
            let double = &double;
            bencher.to_async(&runtime).iter(|| async move {
                black_box(double.apply(Deferred::pure(data.clone())).await)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map,
    benchmark_pipeline,
    benchmark_paths,
    benchmark_deferred
);
criterion_main!(benches);
