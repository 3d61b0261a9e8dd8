use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gobang::heuristic::best_move;
use gobang::{Board, Side};

fn midgame_board() -> Board {
    #[rustfmt::skip]
    let board = Board::from_row_slice(15, &[
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 1, 2, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 2, 0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]).unwrap();
    board
}

fn bench_best_move(c: &mut Criterion) {
    let board = midgame_board();

    // Correctness guard before benchmarking.
    let pick = best_move(
        board.size(),
        board.stones(Side::Black),
        board.stones(Side::White),
        None,
    )
    .expect("midgame position has legal moves");
    assert!(board.is_cell_empty(pick));

    let mut group = c.benchmark_group("heuristic");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    group.bench_function("best_move_midgame", |b| {
        b.iter(|| {
            best_move(
                black_box(board.size()),
                black_box(board.stones(Side::Black)),
                black_box(board.stones(Side::White)),
                None,
            )
            .expect("benchmark position has legal moves")
        });
    });
    group.finish();
}

fn bench_forbidden_moves(c: &mut Criterion) {
    let mut board = midgame_board();

    // Correctness guard: the map only names empty cells.
    let map = board.forbidden_moves().expect("scan succeeds");
    for pos in map.keys() {
        assert!(board.is_cell_empty(*pos));
    }

    let mut group = c.benchmark_group("rules");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    group.bench_function("forbidden_map_midgame", |b| {
        b.iter(|| {
            board
                .forbidden_moves()
                .expect("benchmark position always scans")
        });
    });
    group.finish();
}

criterion_group!(engine_benches, bench_best_move, bench_forbidden_moves);
criterion_main!(engine_benches);
