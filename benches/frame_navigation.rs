// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the gesture hot path.
//!
//! Measures the performance of:
//! - Gesture tracking (pointer positions to frame steps)
//! - Wraparound arithmetic for frame steps and slider requests

use criterion::{criterion_group, criterion_main, Criterion};
use orbit_lens::domain::viewer::{frame_number_to_index, wrap_index, Sensitivity};
use orbit_lens::viewer::GestureTracker;
use std::hint::black_box;

/// Benchmark a long drag made of many small pointer moves.
fn bench_gesture_tracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_navigation");
    let sensitivity = Sensitivity::default();

    #[allow(clippy::cast_precision_loss)]
    let positions: Vec<f32> = (0..1_000).map(|i| i as f32 * 1.7).collect();

    group.bench_function("gesture_drag_1000_moves", |b| {
        b.iter(|| {
            let mut tracker = GestureTracker::new();
            tracker.begin(0.0);
            let mut steps = 0_i64;
            for &x in &positions {
                steps += i64::from(tracker.update(black_box(x), sensitivity));
            }
            tracker.end();
            black_box(steps);
        });
    });

    group.finish();
}

/// Benchmark frame arithmetic in both directions.
fn bench_wraparound(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_navigation");

    group.bench_function("wrap_index", |b| {
        b.iter(|| {
            let mut index = 0;
            for step in -50..50_i64 {
                index = wrap_index(black_box(index), step, black_box(40));
            }
            black_box(index);
        });
    });

    group.bench_function("frame_number_to_index", |b| {
        b.iter(|| {
            for frame in -100..100_i64 {
                black_box(frame_number_to_index(black_box(frame), 16));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gesture_tracking, bench_wraparound);
criterion_main!(benches);
