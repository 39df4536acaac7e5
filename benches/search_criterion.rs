use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use maxn_chess::chess_errors::ChessResult;
use maxn_chess::game_state::board::Board;
use maxn_chess::game_state::chess_rules::{standard_four_player, standard_two_player};
use maxn_chess::game_state::player_state::PlayerState;
use maxn_chess::search::board_scoring::ShareScorer;
use maxn_chess::search::maxn::MaxnSearcher;
use maxn_chess::search::transposition_table::KeyPolicy;
use maxn_chess::utils::board_text::parse_position;

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    setup: fn() -> ChessResult<(Board, PlayerState)>,
}

fn rook_endgame() -> ChessResult<(Board, PlayerState)> {
    parse_position(
        "
        .. .. .. .. .. .. K1 ..
        .. .. .. .. .. P1 P1 P1
        .. .. .. .. .. .. .. ..
        .. .. .. .. .. .. .. ..
        .. .. .. .. .. .. .. ..
        .. .. .. .. .. .. .. ..
        P0 P0 .. .. .. .. .. ..
        R0 .. .. .. .. .. K0 ..
        ",
        2,
    )
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "two_player_start",
        setup: standard_two_player,
    },
    SearchCase {
        name: "four_player_start",
        setup: standard_four_player,
    },
    SearchCase {
        name: "rook_endgame",
        setup: rook_endgame,
    },
];

fn bench_maxn_search(c: &mut Criterion) {
    let depth = std::env::var("MAXN_BENCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(3)
        .max(1);

    let mut group = c.benchmark_group("maxn_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let (board, players) = (case.setup)().expect("benchmark layout should build");
        let scorer = ShareScorer::for_board(&board);

        for policy in [KeyPolicy::PositionAndDepth, KeyPolicy::PositionOnly] {
            group.bench_with_input(
                BenchmarkId::new(format!("{}_{policy}", case.name), format!("d{depth}")),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        let mut searcher =
                            MaxnSearcher::new(board.clone(), players.clone(), scorer.clone(), policy);
                        let outcome = searcher
                            .search_root(black_box(depth))
                            .expect("search should complete");
                        black_box(outcome.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_maxn_search);
criterion_main!(search_benches);
