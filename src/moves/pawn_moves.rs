//! Pawn pushes, captures and en-passant candidates for any facing.
//!
//! "Forward" is the color's facing; the two capture diagonals are forward
//! plus either perpendicular step, so the same code serves all four seats
//! of the cross board.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Point};
use crate::moves::move_descriptions::{MoveKind, PseudoMove};
use crate::moves::piece_moves::{classify_step, Step};

pub fn generate_pawn_moves(board: &Board, from: Point, piece: Piece, out: &mut Vec<PseudoMove>) {
    let (fx, fy) = piece.facing.step();
    let color = piece.color;
    let advance = |to: Point| {
        if board.is_promotion_square(color, to) {
            MoveKind::Promotion
        } else {
            MoveKind::Simple
        }
    };

    let one = from.offset(fx, fy);
    if classify_step(board, piece, one) == Step::Empty {
        out.push(PseudoMove::new(from, one, color, piece.kind, advance(one)));

        let two = one.offset(fx, fy);
        if !piece.moved && classify_step(board, piece, two) == Step::Empty {
            let kind = if board.is_promotion_square(color, two) {
                MoveKind::Promotion
            } else {
                MoveKind::RevealEnPassant
            };
            out.push(PseudoMove::new(from, two, color, piece.kind, kind));
        }
    }

    for (sx, sy) in [(fy, fx), (-fy, -fx)] {
        let to = one.offset(sx, sy);
        match classify_step(board, piece, to) {
            Step::Blocked => {}
            Step::Capture => out.push(PseudoMove::new(from, to, color, piece.kind, advance(to))),
            Step::Ally => out.push(PseudoMove::new(from, to, color, piece.kind, MoveKind::AllyDefense)),
            Step::Empty => {
                if is_en_passant_target(board, piece, to) {
                    out.push(PseudoMove::new(from, to, color, piece.kind, MoveKind::CaptureEnPassant));
                }
            }
        }
    }
}

fn is_en_passant_target(board: &Board, piece: Piece, to: Point) -> bool {
    (0..board.player_count())
        .filter(|&other| other != piece.color)
        .any(|other| {
            let record = board.en_passant(other);
            record.is_active() && record.target == to
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Facing, PieceKind};
    use crate::move_generation::move_command::Move;
    use crate::utils::board_text::parse_board;

    fn targets(board: &Board, from: Point) -> Vec<(Point, MoveKind)> {
        board.moves_from(from).iter().map(|m| (m.to, m.kind)).collect()
    }

    #[test]
    fn unmoved_pawn_can_push_once_or_twice() {
        let board = parse_board(
            "
            .. .. .. K1
            .. .. .. ..
            .. .. .. ..
            .. P0 .. ..
            K0 .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        let moves = targets(&board, Point::new(1, 1));
        assert!(moves.contains(&(Point::new(1, 2), MoveKind::Simple)));
        assert!(moves.contains(&(Point::new(1, 3), MoveKind::RevealEnPassant)));
        assert_eq!(moves.len(), 2, "empty diagonals are not captures");
    }

    #[test]
    fn moved_or_blocked_pawns_do_not_double_push() {
        let board = parse_board(
            "
            .. .. .. K1
            .. .. .. ..
            .. P1 .. ..
            .. P0 P0+ ..
            K0 .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        assert!(targets(&board, Point::new(1, 1)).is_empty(), "blocked straight ahead");
        let moved = targets(&board, Point::new(2, 1));
        assert!(moved.contains(&(Point::new(2, 2), MoveKind::Simple)));
        assert!(!moved.iter().any(|(_, kind)| *kind == MoveKind::RevealEnPassant));
        assert!(moved.contains(&(Point::new(1, 2), MoveKind::Simple)), "capture onto P1");
    }

    #[test]
    fn east_facing_pawn_advances_along_x() {
        let mut board = Board::new(5, 5, 2).expect("board");
        let pawn = Piece::new(0, PieceKind::Pawn, Facing::East);
        board.place(Point::new(0, 2), pawn).expect("place");
        board
            .place(Point::new(1, 3), Piece::new(1, PieceKind::Knight, Facing::South))
            .expect("place");
        board.recompute_moves();
        let moves = targets(&board, Point::new(0, 2));
        assert!(moves.contains(&(Point::new(1, 2), MoveKind::Simple)));
        assert!(moves.contains(&(Point::new(2, 2), MoveKind::RevealEnPassant)));
        assert!(moves.contains(&(Point::new(1, 3), MoveKind::Simple)));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn reaching_the_promotion_line_is_a_promotion() {
        let board = parse_board(
            "
            .. .. .. K1
            P0+ .. .. ..
            .. .. .. ..
            K0 .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        assert_eq!(
            targets(&board, Point::new(0, 2)),
            vec![(Point::new(0, 3), MoveKind::Promotion)]
        );
    }

    #[test]
    fn double_push_onto_the_promotion_line_promotes() {
        let mut board = parse_board(
            "
            .. .. .. K1
            .. .. .. ..
            P0 .. .. ..
            .. .. K0 ..
            ",
            2,
        )
        .expect("layout should parse");
        let moves = targets(&board, Point::new(0, 1));
        assert!(moves.contains(&(Point::new(0, 2), MoveKind::Simple)));
        assert!(moves.contains(&(Point::new(0, 3), MoveKind::Promotion)));
        assert!(!moves.iter().any(|(_, kind)| *kind == MoveKind::RevealEnPassant));

        let double = *board
            .moves_from(Point::new(0, 1))
            .iter()
            .find(|m| m.to == Point::new(0, 3))
            .expect("double push");
        let mv = Move::from_pseudo(&board, &double, None).expect("move");
        mv.execute(&mut board).expect("execute");
        let landed = board.piece_at(Point::new(0, 3)).expect("piece on the last rank");
        assert_eq!(landed.kind, PieceKind::Queen);
        assert!(!board.en_passant(0).is_active());
    }
}
