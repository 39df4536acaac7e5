//! Check detection and the make/unmake legality filter.
//!
//! Everything here reads the board's move indices, so the board must be
//! freshly recomputed on entry. The filters leave it recomputed on exit.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Facing, PieceKind, Point};
use crate::move_generation::move_command::Move;
use crate::move_generation::transition::Verdict;
use crate::moves::move_descriptions::PseudoMove;

/// True if a piece of any other color threatens `square`.
///
/// Pawns only list a diagonal when there is something to take, so empty
/// squares they cover are found from the pawn geometry instead.
#[inline]
pub fn is_square_attacked(board: &Board, square: Point, defender: Color) -> bool {
    board
        .moves_to(square)
        .iter()
        .any(|m| m.color != defender && m.attacks())
        || is_pawn_attacked(board, square, defender)
}

fn is_pawn_attacked(board: &Board, square: Point, defender: Color) -> bool {
    [Facing::North, Facing::East, Facing::South, Facing::West]
        .into_iter()
        .any(|facing| {
            let (fx, fy) = facing.step();
            [(fy, fx), (-fy, -fx)].into_iter().any(|(sx, sy)| {
                board
                    .piece_at(square.offset(-fx - sx, -fy - sy))
                    .is_some_and(|pawn| {
                        pawn.kind == PieceKind::Pawn
                            && pawn.facing == facing
                            && pawn.color != defender
                            && !board.is_color_disabled(pawn.color)
                    })
            })
        })
}

/// King attacked, or any square of the color's castling path attacked.
/// A color without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    if !board.has_king(color) {
        return false;
    }
    if is_square_attacked(board, board.king_location(color), color) {
        return true;
    }
    board
        .vulnerable(color)
        .points()
        .any(|square| is_square_attacked(board, square, color))
}

/// Plays `candidate`, asks whether the mover is left in check, and takes
/// it back. Leaves the move indices describing the post-move position.
pub(crate) fn leaves_mover_safe(board: &mut Board, candidate: &PseudoMove) -> ChessResult<bool> {
    let mv = Move::from_pseudo(board, candidate, None)?;
    mv.execute(board)?;
    board.recompute_moves();
    let safe = !is_in_check(board, candidate.color);
    mv.undo(board)?;
    Ok(safe)
}

fn filter_legal(board: &mut Board, candidates: Vec<PseudoMove>) -> ChessResult<Vec<PseudoMove>> {
    let mut legal = Vec::with_capacity(candidates.len());
    let mut result = Ok(());
    for candidate in candidates.into_iter().filter(|m| !m.is_ally_defense()) {
        match leaves_mover_safe(board, &candidate) {
            Ok(true) => legal.push(candidate),
            Ok(false) => {}
            Err(err) => {
                result = Err(err);
                break;
            }
        }
    }
    board.recompute_moves();
    result.map(|()| legal)
}

/// Legal moves of `color`, in generation order. Ally-defense placeholders
/// are never legal.
pub fn legal_moves(board: &mut Board, color: Color) -> ChessResult<Vec<PseudoMove>> {
    if board.is_color_disabled(color) {
        return Ok(Vec::new());
    }
    let candidates = board.moves_for(color).to_vec();
    filter_legal(board, candidates)
}

/// Legal moves of whatever piece stands on `square`.
pub fn legal_moves_from(board: &mut Board, square: Point) -> ChessResult<Vec<PseudoMove>> {
    let candidates = board.moves_from(square).to_vec();
    filter_legal(board, candidates)
}

pub fn has_legal_move(board: &mut Board, color: Color) -> ChessResult<bool> {
    if board.is_color_disabled(color) {
        return Ok(false);
    }
    let candidates = board.moves_for(color).to_vec();
    let mut found = Ok(false);
    for candidate in candidates.iter().filter(|m| !m.is_ally_defense()) {
        match leaves_mover_safe(board, candidate) {
            Ok(false) => continue,
            other => {
                found = other;
                break;
            }
        }
    }
    board.recompute_moves();
    found
}

/// No legal move is checkmate when in check and stalemate otherwise. A
/// color whose king is gone is treated as checkmated.
pub fn checkmate_and_stalemate(board: &mut Board, color: Color) -> ChessResult<Verdict> {
    if board.is_color_disabled(color) {
        return Ok(Verdict::default());
    }
    if !board.has_king(color) {
        return Ok(Verdict::CHECKMATE);
    }
    let in_check = is_in_check(board, color);
    let stuck = !has_legal_move(board, color)?;
    Ok(Verdict {
        in_check,
        in_checkmate: in_check && stuck,
        in_stalemate: !in_check && stuck,
    })
}
