use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use soulboard::board::Board;
use soulboard::movegen::find_all_valid_moves;
use soulboard::resolve;
use soulboard::search::{select_best, PriorityConfig, DEFAULT_ORB_BONUS};
use soulboard::shape::{ShapeKind, ShapeSet};

fn reference_policy() -> PriorityConfig {
    let mut policy = PriorityConfig::new();
    policy.set(ShapeKind::Single, 10);
    policy.set(ShapeKind::Pair, 50);
    policy.set(ShapeKind::Square, 100);
    policy.set(ShapeKind::FourL, 80);
    policy.set(ShapeKind::FourI, 80);
    policy
}

fn bench_movegen(c: &mut Criterion) {
    let board = Board::with_shapes(6, 6, 42, ShapeSet::default());
    c.bench_function("find_all_valid_moves 6x6", |b| {
        b.iter(|| find_all_valid_moves(black_box(&board)))
    });
}

fn bench_cascade(c: &mut Criterion) {
    let board = Board::with_shapes(6, 6, 42, ShapeSet::default());
    let mv = find_all_valid_moves(&board)[0];
    c.bench_function("apply cascade 6x6", |b| {
        b.iter_batched(
            || board.clone(),
            |mut copy| resolve::apply(&mut copy, black_box(mv)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_selection(c: &mut Criterion) {
    let board = Board::with_shapes(6, 6, 42, ShapeSet::default());
    let policy = reference_policy();
    c.bench_function("select_best 6x6", |b| {
        b.iter(|| select_best(black_box(&board), &policy, DEFAULT_ORB_BONUS))
    });
}

criterion_group!(benches, bench_movegen, bench_cascade, bench_selection);
criterion_main!(benches);
