use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Point};
use crate::moves::move_descriptions::PseudoMove;
use crate::moves::piece_moves::push_step;

pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub fn generate_knight_moves(board: &Board, from: Point, piece: Piece, out: &mut Vec<PseudoMove>) {
    for (dx, dy) in KNIGHT_JUMPS {
        push_step(board, from, piece, from.offset(dx, dy), out);
    }
}
