//! Engine-vs-engine game runner.
//!
//! Seats one `Engine` per color, asks the player to move for a move each
//! ply and plays it through `Game::apply_move`, so every engine answer is
//! validated against the legal set.

use std::time::Instant;

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::Color;
use crate::game_state::game_session::Game;
use crate::moves::move_descriptions::MoveKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Color),
    /// Stalemate; the game ended without a winner.
    Draw,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u32,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_game: Game,
    pub played: Vec<MoveKey>,
    /// Indexed by color.
    pub move_counts: Vec<u32>,
    pub total_time_ns: Vec<u128>,
}

impl MatchResult {
    pub fn report(&self) -> String {
        let per_seat: Vec<String> = self
            .move_counts
            .iter()
            .zip(&self.total_time_ns)
            .enumerate()
            .map(|(color, (&moves, &ns))| {
                let avg_ms = if moves == 0 {
                    0.0
                } else {
                    ns as f64 / f64::from(moves) / 1_000_000.0
                };
                format!("seat{color}: moves={moves} avg_ms={avg_ms:.3}")
            })
            .collect();
        format!("outcome={:?} plies={} {}", self.outcome, self.played.len(), per_seat.join(" "))
    }
}

/// Plays until the game ends or `max_plies` is reached. `observer` sees
/// the game after every ply.
pub fn play_match<F>(
    mut game: Game,
    seats: &mut [Box<dyn Engine>],
    config: &MatchConfig,
    mut observer: F,
) -> ChessResult<MatchResult>
where
    F: FnMut(&Game, &MoveKey),
{
    let seat_count = game.players().player_count();
    if seats.len() != seat_count {
        return Err(ChessError::InvalidLayout(format!(
            "{} engines for {} seats",
            seats.len(),
            seat_count
        )));
    }
    for engine in seats.iter_mut() {
        engine.new_game();
    }

    let mut played = Vec::new();
    let mut move_counts = vec![0u32; seat_count];
    let mut total_time_ns = vec![0u128; seat_count];

    for _ in 0..config.max_plies {
        if game.players().is_game_over() {
            break;
        }
        let mover = game.players().current();
        let engine = &mut seats[mover];
        let started = Instant::now();
        let out = engine.choose_move(&game, &config.go_params)?;
        move_counts[mover] = move_counts[mover].saturating_add(1);
        total_time_ns[mover] = total_time_ns[mover].saturating_add(started.elapsed().as_nanos());

        let key = out.best_move.ok_or(ChessError::NoMoveFound)?;
        debug!(seat = mover, engine = engine.name(), mv = %key, "engine move");
        game.apply_move(key.from(), key.to(), key.promotion)?;
        played.push(key);
        observer(&game, &key);
    }

    let outcome = if !game.players().is_game_over() {
        MatchOutcome::MaxPlies
    } else {
        match game.players().winner() {
            Some(color) => MatchOutcome::Winner(color),
            None => MatchOutcome::Draw,
        }
    };
    Ok(MatchResult {
        outcome,
        final_game: game,
        played,
        move_counts,
        total_time_ns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_maxn::MaxnEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::search::iterative_deepening::SearchConfig;

    #[test]
    fn random_four_player_game_runs_to_completion_or_limit() {
        let game = Game::standard_four_player().expect("game");
        let mut seats: Vec<Box<dyn Engine>> = (0..4)
            .map(|seed| Box::new(RandomEngine::with_seed(seed)) as Box<dyn Engine>)
            .collect();
        let config = MatchConfig {
            max_plies: 60,
            ..MatchConfig::default()
        };
        let mut seen = 0;
        let result = play_match(game, &mut seats, &config, |_, _| seen += 1).expect("match");
        assert_eq!(seen, result.played.len());
        assert_eq!(result.move_counts.iter().sum::<u32>() as usize, result.played.len());
        assert!(result.report().contains("seat0"));
    }

    #[test]
    fn seat_count_must_match() {
        let game = Game::standard_two_player().expect("game");
        let mut seats: Vec<Box<dyn Engine>> = vec![Box::new(RandomEngine::with_seed(1))];
        assert!(matches!(
            play_match(game, &mut seats, &MatchConfig::default(), |_, _| {}),
            Err(ChessError::InvalidLayout(_))
        ));
    }

    #[test]
    fn maxn_seat_delivers_back_rank_mate() {
        let game = Game::from_text(
            "
            .. .. .. .. .. .. K1 ..
            .. .. .. .. .. P1 P1 P1
            .. .. .. .. .. .. .. ..
            .. .. .. .. .. .. .. ..
            .. .. .. .. .. .. .. ..
            .. .. .. .. .. .. .. ..
            .. .. .. .. .. .. .. ..
            R0 .. .. .. .. .. K0 ..
            ",
            2,
        )
        .expect("game");
        let config = SearchConfig {
            max_depth: 2,
            movetime_ms: 5_000,
            ..SearchConfig::default()
        };
        let mut seats: Vec<Box<dyn Engine>> = vec![
            Box::new(MaxnEngine::new(config)),
            Box::new(RandomEngine::with_seed(3)),
        ];
        let result = play_match(game, &mut seats, &MatchConfig::default(), |_, _| {}).expect("match");
        assert_eq!(result.outcome, MatchOutcome::Winner(0));
        assert_eq!(result.played.len(), 1);
    }
}
