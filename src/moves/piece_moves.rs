//! Per-kind pseudo-legal move generation.
//!
//! Dispatches on the closed `PieceKind` enum so adding a kind fails to
//! compile until it is handled here. Generated moves respect bounds,
//! disabled squares and blocked paths, but not king safety.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Point};
use crate::moves::king_moves::generate_king_moves;
use crate::moves::knight_moves::generate_knight_moves;
use crate::moves::move_descriptions::{MoveKind, PseudoMove};
use crate::moves::pawn_moves::generate_pawn_moves;
use crate::moves::sliding_moves::{generate_sliding_moves, DIAGONALS, ORTHOGONALS, ROYAL_DIRECTIONS};

pub fn generate_piece_moves(board: &Board, from: Point, piece: Piece, out: &mut Vec<PseudoMove>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece, out),
        PieceKind::Bishop => generate_sliding_moves(board, from, piece, &DIAGONALS, out),
        PieceKind::Rook => generate_sliding_moves(board, from, piece, &ORTHOGONALS, out),
        PieceKind::Queen => generate_sliding_moves(board, from, piece, &ROYAL_DIRECTIONS, out),
        PieceKind::King => generate_king_moves(board, from, piece, out),
    }
}

/// Outcome of stepping a piece onto one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Off the board or disabled.
    Blocked,
    Empty,
    Capture,
    Ally,
}

#[inline]
pub(crate) fn classify_step(board: &Board, piece: Piece, to: Point) -> Step {
    if !board.is_enabled(to) {
        return Step::Blocked;
    }
    match board.piece_at(to) {
        None => Step::Empty,
        Some(other) if other.color == piece.color => Step::Ally,
        Some(_) => Step::Capture,
    }
}

/// Single-step move for knights and kings.
#[inline]
pub(crate) fn push_step(board: &Board, from: Point, piece: Piece, to: Point, out: &mut Vec<PseudoMove>) {
    let kind = match classify_step(board, piece, to) {
        Step::Blocked => return,
        Step::Empty | Step::Capture => MoveKind::Simple,
        Step::Ally => MoveKind::AllyDefense,
    };
    out.push(PseudoMove::new(from, to, piece.color, piece.kind, kind));
}
