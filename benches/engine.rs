//! Benchmarks for the partition engine and buffer flattening.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use centercuts::engine::{stable_partition, Action, ANIMATION_DURATION_MS};
use centercuts::render::{build_indices, flatten_colors, flatten_positions};
use centercuts::{build_pieces, PuzzleConfig, PuzzleEngine};

/// Benchmark the stable partition of the default piece set.
fn bench_partition(c: &mut Criterion) {
    let pieces = build_pieces(&PuzzleConfig::default()).unwrap();

    c.bench_function("stable_partition", |b| {
        b.iter_batched(
            || pieces.clone(),
            |mut pieces| black_box(stable_partition(&mut pieces, (1, 1, 1))),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark flattening the vertex buffers.
fn bench_flatten(c: &mut Criterion) {
    let pieces = build_pieces(&PuzzleConfig::default()).unwrap();

    c.bench_function("flatten_positions", |b| {
        b.iter(|| flatten_positions(black_box(&pieces)))
    });
    c.bench_function("flatten_colors", |b| {
        b.iter(|| flatten_colors(black_box(&pieces)))
    });
}

/// Benchmark building the fan-triangulation index buffer.
fn bench_indices(c: &mut Criterion) {
    let pieces = build_pieces(&PuzzleConfig::default()).unwrap();

    c.bench_function("build_indices", |b| {
        b.iter(|| build_indices(black_box(&pieces)))
    });
}

/// Benchmark one full accept-and-commit turn cycle.
fn bench_turn_cycle(c: &mut Criterion) {
    let pieces = build_pieces(&PuzzleConfig::default()).unwrap();

    c.bench_function("turn_cycle", |b| {
        b.iter_batched(
            || PuzzleEngine::new(pieces.clone()),
            |mut engine| {
                engine.on_action_key(Action::from_signs(true, true, true));
                engine.tick(ANIMATION_DURATION_MS + 1.0);
                black_box(engine.pieces().len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_partition,
    bench_flatten,
    bench_indices,
    bench_turn_cycle
);
criterion_main!(benches);
