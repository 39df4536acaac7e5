//! Self-play driver: seats a max^n engine (or a random mover) at every
//! color of a standard 2p or 4p game and prints the board after each ply.
//!
//! Run with:
//! `cargo run --release --bin selfplay -- --players 4 --depth 3 --movetime 500`
//! `cargo run --release --bin selfplay -- --players 2 --random-seats 1 --plies 80`
//!
//! Set `RUST_LOG=maxn_chess=debug` for per-depth search logs.

use maxn_chess::engines::engine_maxn::MaxnEngine;
use maxn_chess::engines::engine_random::RandomEngine;
use maxn_chess::engines::engine_trait::{Engine, GoParams};
use maxn_chess::game_state::chess_types::Color;
use maxn_chess::game_state::game_session::Game;
use maxn_chess::search::iterative_deepening::SearchConfig;
use maxn_chess::utils::board_text::render_board;
use maxn_chess::utils::match_harness::{play_match, MatchConfig};
use tracing_subscriber::EnvFilter;

struct Args {
    players: usize,
    depth: u32,
    movetime_ms: u64,
    plies: u32,
    random_seats: Vec<Color>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            players: 4,
            depth: 3,
            movetime_ms: 1000,
            plies: 200,
            random_seats: Vec::new(),
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "--players" => args.players = parse_number(&value()?)?,
            "--depth" => args.depth = parse_number(&value()?)?,
            "--movetime" => args.movetime_ms = parse_number(&value()?)?,
            "--plies" => args.plies = parse_number(&value()?)?,
            "--random-seats" => {
                args.random_seats = value()?
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(parse_number)
                    .collect::<Result<_, _>>()?;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    if args.players != 2 && args.players != 4 {
        return Err(format!("--players must be 2 or 4, got {}", args.players));
    }
    if args.depth == 0 {
        return Err("--depth must be at least 1".to_owned());
    }
    Ok(args)
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("'{text}' is not a valid number"))
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;
    let game = match args.players {
        2 => Game::standard_two_player(),
        _ => Game::standard_four_player(),
    }
    .map_err(|e| e.to_string())?;

    let config = SearchConfig {
        max_depth: args.depth,
        min_depth: args.depth.min(SearchConfig::default().min_depth),
        movetime_ms: args.movetime_ms,
        ..SearchConfig::default()
    };
    let mut seats: Vec<Box<dyn Engine>> = (0..args.players)
        .map(|color| {
            if args.random_seats.contains(&color) {
                Box::new(RandomEngine::new()) as Box<dyn Engine>
            } else {
                Box::new(MaxnEngine::new(config)) as Box<dyn Engine>
            }
        })
        .collect();

    println!("{}\n", render_board(game.board()));
    let match_config = MatchConfig {
        max_plies: args.plies,
        go_params: GoParams::default(),
    };
    let result = play_match(game, &mut seats, &match_config, |game, key| {
        let ply = game.history().cursor();
        println!("ply {ply}: {key}  status={:?}", game.status());
        println!("{}\n", render_board(game.board()));
    })
    .map_err(|e| e.to_string())?;

    println!("{}", result.report());
    Ok(())
}
