//! King steps and castling candidates.
//!
//! Castling is found by walking each orthogonal ray from an unmoved king
//! across empty squares until it meets an unmoved rook of the same color
//! with at least two empty squares in between. The king lands two squares
//! along the ray and the rook on the square the king crossed. Whether the
//! crossed squares are attacked is decided later through the vulnerable
//! rectangle the castle installs.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Point};
use crate::moves::move_descriptions::{MoveKind, PseudoMove};
use crate::moves::piece_moves::push_step;
use crate::moves::sliding_moves::{ORTHOGONALS, ROYAL_DIRECTIONS};

pub fn generate_king_moves(board: &Board, from: Point, piece: Piece, out: &mut Vec<PseudoMove>) {
    for (dx, dy) in ROYAL_DIRECTIONS {
        push_step(board, from, piece, from.offset(dx, dy), out);
    }
    if !piece.moved {
        generate_castles(board, from, piece, out);
    }
}

fn generate_castles(board: &Board, from: Point, piece: Piece, out: &mut Vec<PseudoMove>) {
    for (dx, dy) in ORTHOGONALS {
        let mut gap = 0;
        let mut cursor = from.offset(dx, dy);
        while board.is_enabled(cursor) && board.piece_at(cursor).is_none() {
            gap += 1;
            cursor = cursor.offset(dx, dy);
        }
        let Some(rook) = board.piece_at(cursor) else {
            continue;
        };
        if gap < 2 || rook.color != piece.color || rook.kind != PieceKind::Rook || rook.moved {
            continue;
        }
        out.push(PseudoMove::new(
            from,
            from.offset(2 * dx, 2 * dy),
            piece.color,
            piece.kind,
            MoveKind::Castle {
                rook_from: cursor,
                rook_to: from.offset(dx, dy),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_text::parse_board;

    fn castles(board: &Board, from: Point) -> Vec<PseudoMove> {
        board
            .moves_from(from)
            .iter()
            .copied()
            .filter(|m| matches!(m.kind, MoveKind::Castle { .. }))
            .collect()
    }

    #[test]
    fn both_sides_castle_on_an_open_back_rank() {
        let board = parse_board(
            "
            .. .. .. .. K1 .. .. ..
            .. .. .. .. .. .. .. ..
            R0 .. .. .. K0 .. .. R0
            ",
            2,
        )
        .expect("layout should parse");
        let found = castles(&board, Point::new(4, 0));
        assert_eq!(found.len(), 2);
        let king_side = found
            .iter()
            .find(|m| m.to == Point::new(6, 0))
            .expect("king side castle");
        assert_eq!(
            king_side.kind,
            MoveKind::Castle {
                rook_from: Point::new(7, 0),
                rook_to: Point::new(5, 0)
            }
        );
        assert!(found.iter().any(|m| m.to == Point::new(2, 0)));
        assert!(found.iter().all(|m| !m.attacks()));
    }

    #[test]
    fn moved_rooks_blocked_paths_and_short_gaps_prevent_castling() {
        let board = parse_board(
            "
            .. .. .. .. K1 .. .. ..
            .. .. .. .. .. .. .. ..
            R0+ .. .. N0 K0 .. R0 ..
            ",
            2,
        )
        .expect("layout should parse");
        assert!(castles(&board, Point::new(4, 0)).is_empty());

        let moved_king = parse_board(
            "
            .. .. .. .. K1 .. .. ..
            .. .. .. .. .. .. .. ..
            R0 .. .. .. K0+ .. .. R0
            ",
            2,
        )
        .expect("layout should parse");
        assert!(castles(&moved_king, Point::new(4, 0)).is_empty());
    }
}
