//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type across the crate. Setup, move
//! application, history navigation and search all return
//! `ChessResult<T>` so callers can propagate with `?` and match on the
//! variant they care about.
//!
//! Usage guidelines:
//! - Input-related variants (`InvalidSquare`, `NoPieceAtSquare`,
//!   `IllegalMove`, `InvalidPromotion`) are recoverable and suitable for
//!   presenting to a player.
//! - `NoHistory`/`NoFuture` only report that undo/redo hit a bound.
//! - `SearchCancelled` never escapes the iterative deepener; it marks an
//!   attempt that was stopped by its deadline.
//! - `Internal` means a worker thread died or an invariant broke; treat it
//!   as a bug.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Point};

/// Unified error type for the engine core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The square is off the board or permanently disabled.
    #[error("square {0} is off the board or disabled")]
    InvalidSquare(Point),

    /// A move was requested from an empty square.
    #[error("no piece at square {0}")]
    NoPieceAtSquare(Point),

    /// The move is not in the legal set for the player to move.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Point, to: Point },

    /// Pawns may only promote to knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// Undo requested with nothing left to undo.
    #[error("no history to undo")]
    NoHistory,

    /// Redo requested with nothing left to redo.
    #[error("no future to redo")]
    NoFuture,

    /// A game needs at least two players.
    #[error("not enough players: {0}")]
    NotEnoughPlayers(usize),

    /// More players than the engine has score slots for.
    #[error("too many players: {0}")]
    TooManyPlayers(usize),

    /// A color was listed twice in the turn order, or is out of range.
    #[error("duplicate or out-of-range color {0}")]
    DuplicateColor(Color),

    /// No further moves are accepted once the game has ended.
    #[error("the game is already over")]
    GameOver,

    /// Search could not complete a single depth.
    #[error("no move found")]
    NoMoveFound,

    /// The in-flight search attempt observed its stop signal.
    #[error("search cancelled")]
    SearchCancelled,

    /// An engine option was unknown or carried a malformed value.
    #[error("invalid option '{name}' = '{value}'")]
    InvalidOption { name: String, value: String },

    /// A board layout (text or builder) was malformed.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Broken invariant or failed worker thread.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
