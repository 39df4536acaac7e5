use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use maxn_chess::chess_errors::ChessResult;
use maxn_chess::game_state::board::Board;
use maxn_chess::game_state::chess_rules::{standard_four_player, standard_two_player};
use maxn_chess::game_state::player_state::PlayerState;
use maxn_chess::move_generation::perft::perft;
use maxn_chess::utils::board_text::parse_position;

type Setup = fn() -> ChessResult<(Board, PlayerState)>;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    setup: Setup,
    /// Known node counts from depth 1 up. Empty means no guard.
    expected_nodes: &'static [u64],
    max_depth: u32,
}

const PIN_ENDGAME: &str = "
    .. .. .. .. .. .. .. ..
    .. .. P1 .. .. .. .. ..
    .. .. .. P1+ .. .. .. ..
    K0+ P0+ .. .. .. .. .. R1+
    .. R0+ .. .. .. P1+ .. K1+
    .. .. .. .. .. .. .. ..
    .. .. .. .. P0 .. P0 ..
    .. .. .. .. .. .. .. ..
";

fn pin_endgame() -> ChessResult<(Board, PlayerState)> {
    parse_position(PIN_ENDGAME, 2)
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "two_player_start",
        setup: standard_two_player,
        expected_nodes: &[20, 400, 8902],
        max_depth: 3,
    },
    BenchCase {
        name: "pin_endgame",
        setup: pin_endgame,
        expected_nodes: &[14, 191, 2812],
        max_depth: 3,
    },
    BenchCase {
        name: "four_player_start",
        setup: standard_four_player,
        expected_nodes: &[20],
        max_depth: 2,
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "two_player_start",
        setup: standard_two_player,
        expected_nodes: &[20, 400, 8902, 197_281],
        max_depth: 4,
    },
    BenchCase {
        name: "pin_endgame",
        setup: pin_endgame,
        expected_nodes: &[14, 191, 2812],
        max_depth: 4,
    },
    BenchCase {
        name: "four_player_start",
        setup: standard_four_player,
        expected_nodes: &[20],
        max_depth: 3,
    },
];

fn standard_suite() -> bool {
    matches!(std::env::var("MAXN_BENCH_SUITE"), Ok(value) if value.eq_ignore_ascii_case("standard"))
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, cases) = if standard_suite() {
        ("standard", CASES_STANDARD)
    } else {
        ("quick", CASES_QUICK)
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases {
        let (board, players) = (case.setup)().expect("benchmark layout should build");

        for depth in 1..=case.max_depth {
            // Correctness guard before benchmarking.
            let warmup = perft(&board, &players, depth).expect("perft should run");
            let nodes = warmup.nodes as u64;
            if let Some(expected) = case.expected_nodes.get(depth as usize - 1) {
                assert_eq!(
                    nodes, *expected,
                    "node mismatch in warmup for {} depth {}",
                    case.name, depth
                );
            }

            group.throughput(Throughput::Elements(nodes));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                &nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&board), black_box(&players), black_box(depth))
                            .expect("perft benchmark run should succeed");
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
