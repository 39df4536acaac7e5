//! Reversible turn-advance command over `PlayerState` and `Board`.
//!
//! A transition is computed once per ply from the player state before the
//! ply and a verdict about the player whose turn it is:
//!
//! | alive before | verdict    | result                                        |
//! |--------------|------------|-----------------------------------------------|
//! | 0            | any        | game over, current and winner unchanged       |
//! | 1            | any        | game over, the survivor wins                  |
//! | any          | stalemate  | game over, no winner, current keeps the turn  |
//! | 2            | checkmate  | mover eliminated, game over, other one wins   |
//! | 3+           | checkmate  | mover eliminated, next living player moves    |
//! | 2+           | none       | next living player moves                      |
//!
//! Whenever the game ends the turn pointer stays on the player whose turn
//! ended it.
//!
//! Ending a turn also clears the mover's castling-path rectangle, which only
//! guards the ply that laid it down. The cleared rectangle is captured on
//! `execute` and put back by `undo`.

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Vulnerable};
use crate::game_state::player_state::PlayerState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    pub in_check: bool,
    pub in_checkmate: bool,
    pub in_stalemate: bool,
}

impl Verdict {
    pub const CHECKMATE: Verdict = Verdict {
        in_check: true,
        in_checkmate: true,
        in_stalemate: false,
    };

    pub const STALEMATE: Verdict = Verdict {
        in_check: false,
        in_checkmate: false,
        in_stalemate: true,
    };

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.in_checkmate || self.in_stalemate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    mover: Color,
    eliminate: bool,
    old_current: Color,
    new_current: Color,
    old_winner: Option<Color>,
    new_winner: Option<Color>,
    old_game_over: bool,
    new_game_over: bool,
    cleared: Vulnerable,
}

impl Transition {
    pub fn new(players: &PlayerState, verdict: Verdict) -> Self {
        let mover = players.current();
        let mut next = Self {
            mover,
            eliminate: false,
            old_current: mover,
            new_current: mover,
            old_winner: players.winner(),
            new_winner: players.winner(),
            old_game_over: players.is_game_over(),
            new_game_over: players.is_game_over(),
            cleared: Vulnerable::NONE,
        };

        match players.alive_count() {
            0 => next.new_game_over = true,
            1 => {
                next.new_game_over = true;
                next.new_winner = players.first_alive();
            }
            _ if verdict.in_stalemate => {
                next.new_game_over = true;
                next.new_winner = None;
            }
            2 if verdict.in_checkmate => {
                next.eliminate = true;
                next.new_game_over = true;
                next.new_winner = players.next_alive_after(mover);
            }
            _ => {
                next.eliminate = verdict.in_checkmate;
                next.new_current = players.next_alive_after(mover).unwrap_or(mover);
            }
        }
        next
    }

    /// Ends the turn of the current player without any verdict.
    #[inline]
    pub fn advance(players: &PlayerState) -> Self {
        Self::new(players, Verdict::default())
    }

    pub fn execute(&mut self, players: &mut PlayerState, board: &mut Board) {
        self.cleared = board.vulnerable(self.mover);
        board.set_vulnerable(self.mover, Vulnerable::NONE);
        if self.eliminate {
            players.set_alive(self.mover, false);
            board.set_color_disabled(self.mover, true);
        }
        players.set_current(self.new_current);
        players.set_winner(self.new_winner);
        players.set_game_over(self.new_game_over);
    }

    pub fn undo(&self, players: &mut PlayerState, board: &mut Board) {
        players.set_current(self.old_current);
        players.set_winner(self.old_winner);
        players.set_game_over(self.old_game_over);
        if self.eliminate {
            players.set_alive(self.mover, true);
            board.set_color_disabled(self.mover, false);
        }
        board.set_vulnerable(self.mover, self.cleared);
    }

    #[inline]
    pub fn eliminates(&self) -> bool {
        self.eliminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Point;

    fn setup(order: &[Color]) -> (PlayerState, Board) {
        let players = PlayerState::new(order).expect("players");
        let board = Board::new(4, 4, order.len()).expect("board");
        (players, board)
    }

    #[test]
    fn plain_turn_advances_and_wraps() {
        let (mut players, mut board) = setup(&[0, 1, 2]);
        for expected in [1, 2, 0] {
            Transition::advance(&players).execute(&mut players, &mut board);
            assert_eq!(players.current(), expected);
        }
        assert!(!players.is_game_over());
    }

    #[test]
    fn checkmate_with_two_alive_ends_the_game() {
        let (mut players, mut board) = setup(&[0, 1]);
        let before = players.clone();
        let mut t = Transition::new(&players, Verdict::CHECKMATE);
        t.execute(&mut players, &mut board);
        assert!(players.is_game_over());
        assert_eq!(players.winner(), Some(1));
        assert!(!players.is_alive(0));
        assert!(board.is_color_disabled(0));

        t.undo(&mut players, &mut board);
        assert_eq!(players, before);
        assert!(!board.is_color_disabled(0));
    }

    #[test]
    fn checkmate_with_more_alive_eliminates_and_continues() {
        let (mut players, mut board) = setup(&[0, 1, 2, 3]);
        players.set_current(1);
        let mut t = Transition::new(&players, Verdict::CHECKMATE);
        t.execute(&mut players, &mut board);
        assert!(!players.is_game_over());
        assert_eq!(players.current(), 2);
        assert!(board.is_color_disabled(1));
        assert_eq!(players.next_alive_after(0), Some(2));
    }

    #[test]
    fn stalemate_is_a_draw_that_keeps_the_turn() {
        let (mut players, mut board) = setup(&[0, 1, 2]);
        players.set_current(2);
        let mut t = Transition::new(&players, Verdict::STALEMATE);
        t.execute(&mut players, &mut board);
        assert!(players.is_game_over());
        assert_eq!(players.winner(), None);
        assert_eq!(players.current(), 2);
        assert!(players.is_alive(2));
    }

    #[test]
    fn last_survivor_wins_and_empty_table_just_stops() {
        let (mut players, mut board) = setup(&[0, 1, 2]);
        players.set_alive(0, false);
        players.set_alive(2, false);
        players.set_current(1);
        Transition::advance(&players).execute(&mut players, &mut board);
        assert!(players.is_game_over());
        assert_eq!(players.winner(), Some(1));

        let (mut empty, mut board) = setup(&[0, 1]);
        empty.set_alive(0, false);
        empty.set_alive(1, false);
        let mut t = Transition::advance(&empty);
        t.execute(&mut empty, &mut board);
        assert!(empty.is_game_over());
        assert_eq!(empty.current(), 0);
        assert_eq!(empty.winner(), None);
    }

    #[test]
    fn ending_a_turn_clears_the_castling_path_until_undone() {
        let (mut players, mut board) = setup(&[0, 1]);
        let path = Vulnerable::spanning(Point::new(1, 0), Point::new(2, 0));
        board.set_vulnerable(0, path);
        board.set_vulnerable(1, Vulnerable::spanning(Point::new(1, 3), Point::new(2, 3)));

        let mut t = Transition::advance(&players);
        t.execute(&mut players, &mut board);
        assert_eq!(board.vulnerable(0), Vulnerable::NONE);
        assert!(board.vulnerable(1).is_active(), "only the mover's path is cleared");

        t.undo(&mut players, &mut board);
        assert_eq!(board.vulnerable(0), path);
        assert_eq!(players.current(), 0);
    }
}
