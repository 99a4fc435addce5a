use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameEngine, GameSnapshot};
use blockfall::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start_game();

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            if !engine.tick() {
                engine.start_game();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if engine.is_game_over() || !engine.hard_drop() {
                engine.start_game();
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start_game();
    let mut dx = 1;

    c.bench_function("move_by", |b| {
        b.iter(|| {
            if !engine.move_by(black_box(dx)) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start_game();
    engine.tick();
    engine.tick();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            engine.rotate(black_box(true));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);
    engine.start_game();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
