#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for extent tracking and view derivation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_axes::prelude::*;

fn extent_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("extent_update");

    for size in [100, 10_000, 1_000_000] {
        let points: Vec<Point> = (0..size)
            .map(|i| {
                let t = i as f64 * 0.001;
                Point::new(t.cos() * t, t.sin() * t)
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut tracker = ExtentTracker::new();
                tracker.update(black_box(&points));
                tracker.autoscale_view(false)
            });
        });
    }

    group.finish();
}

fn log_view_benchmark(c: &mut Criterion) {
    let mut tracker = ExtentTracker::new().scales(AxisScale::Log, AxisScale::Log);
    let points: Vec<Point> = (1..10_000).map(|i| Point::new(f64::from(i), f64::from(i).sqrt())).collect();
    tracker.update(&points);

    c.bench_function("extent_log_view", |b| {
        b.iter(|| black_box(&tracker).compute_view(false));
    });
}

criterion_group!(benches, extent_benchmark, log_view_benchmark);
criterion_main!(benches);
