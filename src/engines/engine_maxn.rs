//! Iterative-deepening max^n engine.
//!
//! Options: `Depth`, `MinDepth`, `MoveTime` (milliseconds) and
//! `TranspositionKey` (`depth` or `position`). Per-move `GoParams`
//! override the configured depth and time.

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{parse_option, Engine, EngineOutput, GoParams};
use crate::game_state::game_session::Game;
use crate::search::iterative_deepening::SearchConfig;
use crate::search::transposition_table::KeyPolicy;

#[derive(Debug, Clone, Default)]
pub struct MaxnEngine {
    config: SearchConfig,
}

impl MaxnEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Engine for MaxnEngine {
    fn name(&self) -> &str {
        "maxn"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        if name.eq_ignore_ascii_case("Depth") {
            let depth: u32 = parse_option(name, value)?;
            if depth == 0 {
                return Err(invalid());
            }
            self.config.max_depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MinDepth") {
            let depth: u32 = parse_option(name, value)?;
            if depth == 0 {
                return Err(invalid());
            }
            self.config.min_depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTime") {
            self.config.movetime_ms = parse_option(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("TranspositionKey") {
            self.config.key_policy = value.trim().parse::<KeyPolicy>()?;
            return Ok(());
        }
        Err(invalid())
    }

    fn choose_move(&mut self, game: &Game, params: &GoParams) -> ChessResult<EngineOutput> {
        let mut out = EngineOutput::default();
        if game.players().is_game_over() {
            out.info_lines.push("info string game over".to_owned());
            return Ok(out);
        }

        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.max_depth = depth.max(1);
        }
        if let Some(movetime) = params.movetime_ms {
            config.movetime_ms = movetime;
        }

        let result = game.search(&config)?;
        let color = game.players().current();
        let outcome = result.outcome;
        debug!(color, best_move = %result.best_move, depth = outcome.depth, "maxn engine decided");

        out.info_lines.push(format!(
            "info depth {} nodes {} score {} tthits {}",
            outcome.depth, result.total_nodes, outcome.scores[color], outcome.tt_stats.hits
        ));
        if result.timed_out {
            out.info_lines.push("info string deadline reached".to_owned());
        }
        out.best_move = Some(result.best_move);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Point;
    use crate::moves::move_descriptions::MoveKey;

    #[test]
    fn options_update_the_config() {
        let mut engine = MaxnEngine::default();
        engine.set_option("Depth", "3").expect("depth");
        engine.set_option("movetime", " 250 ").expect("movetime");
        engine.set_option("TranspositionKey", "position").expect("key");
        assert_eq!(engine.config().max_depth, 3);
        assert_eq!(engine.config().movetime_ms, 250);
        assert_eq!(engine.config().key_policy, KeyPolicy::PositionOnly);

        assert!(matches!(
            engine.set_option("Depth", "zero"),
            Err(ChessError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Depth", "0"),
            Err(ChessError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Ponder", "true"),
            Err(ChessError::InvalidOption { .. })
        ));
    }

    #[test]
    fn finds_the_mating_rook_move() {
        let game = Game::from_text(
            "
            .. .. .. .. .. .. K1 ..
            .. .. .. .. .. P1 P1 P1
            .. .. .. .. .. .. .. ..
            R0 .. .. .. .. .. K0 ..
            ",
            2,
        )
        .expect("game");
        let mut engine = MaxnEngine::default();
        let params = GoParams {
            depth: Some(2),
            movetime_ms: Some(5_000),
        };
        let out = engine.choose_move(&game, &params).expect("engine");
        assert_eq!(
            out.best_move,
            Some(MoveKey::new(Point::new(0, 0), Point::new(0, 3), None))
        );
        assert!(!out.info_lines.is_empty());
    }
}
