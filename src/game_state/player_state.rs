//! Turn order, elimination and game-over bookkeeping.
//!
//! Players are never removed, only marked dead, so colors stay valid
//! indices into every per-color board table.

use std::fmt::Write;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, MAX_PLAYERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub index: Color,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    players: Vec<Player>,
    current: Color,
    winner: Option<Color>,
    game_over: bool,
}

impl PlayerState {
    /// `turn_order` lists the colors in the order they move; the first one
    /// starts.
    pub fn new(turn_order: &[Color]) -> ChessResult<Self> {
        if turn_order.len() < 2 {
            return Err(ChessError::NotEnoughPlayers(turn_order.len()));
        }
        if turn_order.len() > MAX_PLAYERS {
            return Err(ChessError::TooManyPlayers(turn_order.len()));
        }
        for (i, &color) in turn_order.iter().enumerate() {
            if color >= MAX_PLAYERS || turn_order[..i].contains(&color) {
                return Err(ChessError::DuplicateColor(color));
            }
        }
        Ok(Self {
            players: turn_order
                .iter()
                .map(|&index| Player { index, alive: true })
                .collect(),
            current: turn_order[0],
            winner: None,
            game_over: false,
        })
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn current(&self) -> Color {
        self.current
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_alive(&self, color: Color) -> bool {
        self.players.iter().any(|p| p.index == color && p.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn first_alive(&self) -> Option<Color> {
        self.players.iter().find(|p| p.alive).map(|p| p.index)
    }

    /// Next living color after `color` in turn order, never `color` itself.
    pub fn next_alive_after(&self, color: Color) -> Option<Color> {
        let n = self.players.len();
        let start = self.players.iter().position(|p| p.index == color)?;
        (1..n)
            .map(|offset| self.players[(start + offset) % n])
            .find(|p| p.alive)
            .map(|p| p.index)
    }

    pub(crate) fn set_current(&mut self, color: Color) {
        self.current = color;
    }

    pub(crate) fn set_winner(&mut self, winner: Option<Color>) {
        self.winner = winner;
    }

    pub(crate) fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    pub(crate) fn set_alive(&mut self, color: Color, alive: bool) {
        if let Some(player) = self.players.iter_mut().find(|p| p.index == color) {
            player.alive = alive;
        }
    }

    pub fn write_canonical_key(&self, out: &mut String) {
        let _ = write!(out, "@{}", self.current);
        match self.winner {
            Some(w) => {
                let _ = write!(out, "w{w}");
            }
            None => out.push('-'),
        }
        out.push(if self.game_over { '!' } else { '~' });
        for player in &self.players {
            out.push(if player.alive { 'a' } else { 'd' });
        }
    }
}
