//! Ray generation for bishops, rooks and queens.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Point};
use crate::moves::move_descriptions::{MoveKind, PseudoMove};
use crate::moves::piece_moves::{classify_step, Step};

pub const ORTHOGONALS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const ROYAL_DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Walks each ray until it leaves the playable area or hits a piece.
pub fn generate_sliding_moves(
    board: &Board,
    from: Point,
    piece: Piece,
    directions: &[(i32, i32)],
    out: &mut Vec<PseudoMove>,
) {
    for &(dx, dy) in directions {
        let mut to = from.offset(dx, dy);
        loop {
            match classify_step(board, piece, to) {
                Step::Blocked => break,
                Step::Empty => {
                    out.push(PseudoMove::new(from, to, piece.color, piece.kind, MoveKind::Simple));
                }
                Step::Capture => {
                    out.push(PseudoMove::new(from, to, piece.color, piece.kind, MoveKind::Simple));
                    break;
                }
                Step::Ally => {
                    out.push(PseudoMove::new(from, to, piece.color, piece.kind, MoveKind::AllyDefense));
                    break;
                }
            }
            to = to.offset(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::Point;
    use crate::utils::board_text::parse_board;

    #[test]
    fn rook_rays_from_the_centre_of_an_empty_board() {
        let board = parse_board(
            "
            .. .. .. .. K1
            .. .. .. .. ..
            .. .. R0 .. ..
            .. .. .. .. ..
            K0 .. .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        assert_eq!(board.moves_from(Point::new(2, 2)).len(), 8);
    }

    #[test]
    fn queen_stops_on_capture_and_on_ally() {
        let board = parse_board(
            "
            .. .. .. .. K1
            .. .. P1 .. ..
            .. .. Q0 P0 ..
            .. .. .. .. ..
            K0 .. .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        let queen = board.moves_from(Point::new(2, 2));
        assert!(queen.iter().any(|m| m.to == Point::new(2, 3) && !m.is_ally_defense()));
        assert!(!queen.iter().any(|m| m.to == Point::new(2, 4)));
        assert!(queen.iter().any(|m| m.to == Point::new(3, 2) && m.is_ally_defense()));
        assert!(!queen.iter().any(|m| m.to == Point::new(4, 2)));
    }
}
