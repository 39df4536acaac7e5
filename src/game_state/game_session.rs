//! Live game: the position, the turn state and the undo/redo history.
//!
//! `Game` is the external entry point. Moves are validated against the
//! legal set, played through `History`, and followed by any terminal
//! transitions for players left without a legal move. Searches run on
//! copies and never touch the live position.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{standard_four_player, standard_two_player};
use crate::game_state::chess_types::*;
use crate::game_state::player_state::PlayerState;
use crate::move_generation::history::History;
use crate::move_generation::legal_move_checks::{checkmate_and_stalemate, legal_moves, legal_moves_from};
use crate::move_generation::move_command::Move;
use crate::move_generation::transition::{Transition, Verdict};
use crate::moves::move_descriptions::{MoveKey, PseudoMove};
use crate::search::board_scoring::ShareScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, DeepeningResult, SearchConfig};
use crate::utils::board_text::parse_position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub at: Point,
    pub piece: Piece,
}

/// Serializable view of everything a client needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub pieces: Vec<PlacedPiece>,
    pub disabled: Vec<Point>,
    pub current: Color,
    pub winner: Option<Color>,
    pub game_over: bool,
    pub status: Verdict,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: PlayerState,
    history: History,
    scorer: ShareScorer,
    initial_status: Verdict,
}

impl Game {
    pub fn new(mut board: Board, players: PlayerState) -> ChessResult<Self> {
        if board.player_count() != players.player_count() {
            return Err(ChessError::InvalidLayout(format!(
                "board has {} colors but {} players are seated",
                board.player_count(),
                players.player_count()
            )));
        }
        board.recompute_moves();
        let initial_status = checkmate_and_stalemate(&mut board, players.current())?;
        let scorer = ShareScorer::for_board(&board);
        Ok(Self {
            board,
            players,
            history: History::new(),
            scorer,
            initial_status,
        })
    }

    pub fn standard_two_player() -> ChessResult<Self> {
        let (board, players) = standard_two_player()?;
        Self::new(board, players)
    }

    pub fn standard_four_player() -> ChessResult<Self> {
        let (board, players) = standard_four_player()?;
        Self::new(board, players)
    }

    /// Game from the text board format with turn order `0..players`.
    pub fn from_text(text: &str, players: usize) -> ChessResult<Self> {
        let (board, players) = parse_position(text, players)?;
        Self::new(board, players)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn players(&self) -> &PlayerState {
        &self.players
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Verdict recorded after the last ply, or for the opening position.
    pub fn status(&self) -> Verdict {
        self.history.tip_status().unwrap_or(self.initial_status)
    }

    /// Legal moves of the player to move. Works on a copy of the board.
    pub fn legal_moves(&self) -> ChessResult<Vec<PseudoMove>> {
        if self.players.is_game_over() {
            return Ok(Vec::new());
        }
        let mut board = self.board.clone();
        legal_moves(&mut board, self.players.current())
    }

    /// Validates and plays one move, then settles the turn of every player
    /// left without a legal reply. Returns the verdict for the first player
    /// to move after it.
    pub fn apply_move(&mut self, from: Point, to: Point, promotion: Option<PieceKind>) -> ChessResult<Verdict> {
        if self.players.is_game_over() {
            return Err(ChessError::GameOver);
        }
        let piece = self.board.read_square(from)?.ok_or(ChessError::NoPieceAtSquare(from))?;
        self.board.read_square(to)?;
        let mover = self.players.current();
        if piece.color != mover {
            return Err(ChessError::IllegalMove { from, to });
        }

        let candidate = legal_moves_from(&mut self.board, from)?
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(ChessError::IllegalMove { from, to })?;
        let mv = Move::from_pseudo(&self.board, &candidate, promotion)?;
        let key = mv.key();
        let transition = Transition::advance(&self.players);
        self.history.execute(&mut self.board, &mut self.players, mv, transition)?;
        info!(color = mover, mv = %key, ply = self.history.cursor(), "move applied");

        let status = self.settle()?;
        self.history.annotate(status);
        Ok(status)
    }

    /// Applies terminal transitions until someone can move or the game ends.
    fn settle(&mut self) -> ChessResult<Verdict> {
        let mut first = None;
        while !self.players.is_game_over() {
            let color = self.players.current();
            let verdict = checkmate_and_stalemate(&mut self.board, color)?;
            first.get_or_insert(verdict);
            if !verdict.is_terminal() {
                break;
            }
            let terminal = Transition::new(&self.players, verdict);
            self.history.settle(&mut self.board, &mut self.players, terminal)?;
            if terminal.eliminates() {
                info!(color, "player eliminated");
            }
        }
        if self.players.is_game_over() {
            info!(winner = ?self.players.winner(), "game over");
        }
        Ok(first.unwrap_or_default())
    }

    pub fn undo(&mut self) -> ChessResult<()> {
        self.history.undo(&mut self.board, &mut self.players)?;
        debug!(ply = self.history.cursor(), "undo");
        Ok(())
    }

    pub fn redo(&mut self) -> ChessResult<()> {
        self.history.redo(&mut self.board, &mut self.players)?;
        debug!(ply = self.history.cursor(), "redo");
        Ok(())
    }

    pub fn current_state(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            pieces: self
                .board
                .pieces()
                .map(|(at, piece)| PlacedPiece { at, piece })
                .collect(),
            disabled: self.board.disabled_squares().collect(),
            current: self.players.current(),
            winner: self.players.winner(),
            game_over: self.players.is_game_over(),
            status: self.status(),
        }
    }

    /// Iterative-deepening search on a copy of the live position.
    pub fn search(&self, config: &SearchConfig) -> ChessResult<DeepeningResult> {
        iterative_deepening_search(&self.board, &self.players, &self.scorer, config)
    }

    pub fn find_best_move(&self, max_depth: u32, time_budget: Duration) -> ChessResult<MoveKey> {
        let defaults = SearchConfig::default();
        let config = SearchConfig {
            max_depth,
            min_depth: defaults.min_depth.min(max_depth),
            movetime_ms: time_budget.as_millis() as u64,
            ..defaults
        };
        self.search(&config).map(|result| result.best_move)
    }
}
