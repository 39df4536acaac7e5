//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for self-play
//! smoke tests and as the weakest bot.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{parse_option, Engine, EngineOutput, GoParams};
use crate::game_state::game_session::Game;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Seed") {
            self.rng = StdRng::seed_from_u64(parse_option(name, value)?);
            return Ok(());
        }
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn choose_move(&mut self, game: &Game, _params: &GoParams) -> ChessResult<EngineOutput> {
        let legal_moves = game.legal_moves()?;

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", legal_moves.len()));
        out.best_move = legal_moves.choose(&mut self.rng).map(|m| m.key());
        Ok(out)
    }
}
