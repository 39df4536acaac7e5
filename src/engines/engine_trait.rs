//! Engine abstraction used by bots and the self-play driver.
//!
//! Defines common input parameters and output payloads so different move
//! choosers can sit behind one trait and be seated at any color.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_session::Game;
use crate::moves::move_descriptions::MoveKey;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the player to move has nothing to play.
    pub best_move: Option<MoveKey>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn choose_move(&mut self, game: &Game, params: &GoParams) -> ChessResult<EngineOutput>;
}

/// Parses a numeric option value, mapping failures to `InvalidOption`.
pub(crate) fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value.trim().parse::<T>().map_err(|_| ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}
