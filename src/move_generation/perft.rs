//! Leaf-node counting through the full make/unmake path.
//!
//! Plays every legal move with `Move` + `Transition` and counts the leaves,
//! so it exercises the generator, the legality filter and both commands.
//! Promotions count once per promotion piece, matching the usual perft
//! tables.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::player_state::PlayerState;
use crate::move_generation::legal_move_checks::legal_moves;
use crate::move_generation::move_command::Move;
use crate::move_generation::transition::Transition;
use crate::moves::move_descriptions::{MoveKind, PseudoMove};

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(board: &Board, players: &PlayerState, depth: u32) -> ChessResult<PerftCounts> {
    let mut board = board.clone();
    let mut players = players.clone();
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    perft_recurse(&mut board, &mut players, depth)
}

fn promotion_choices(candidate: &PseudoMove) -> &'static [PieceKind] {
    match candidate.kind {
        MoveKind::Promotion => &PROMOTION_CHOICES,
        _ => &PROMOTION_CHOICES[..1],
    }
}

fn perft_recurse(board: &mut Board, players: &mut PlayerState, depth: u32) -> ChessResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if players.is_game_over() {
        return Ok(total);
    }

    for candidate in legal_moves(board, players.current())? {
        for &promotion in promotion_choices(&candidate) {
            let mv = Move::from_pseudo(board, &candidate, Some(promotion))?;
            if depth == 1 {
                total.nodes += 1;
                if mv.captures() > 0 {
                    total.captures += 1;
                }
                match candidate.kind {
                    MoveKind::CaptureEnPassant => total.en_passant += 1,
                    MoveKind::Castle { .. } => total.castles += 1,
                    MoveKind::Promotion => total.promotions += 1,
                    _ => {}
                }
                continue;
            }

            let mut transition = Transition::advance(players);
            mv.execute(board)?;
            transition.execute(players, board);
            board.recompute_moves();

            let child = perft_recurse(board, players, depth - 1);

            transition.undo(players, board);
            mv.undo(board)?;
            board.recompute_moves();
            total.merge(child?);
        }
    }
    Ok(total)
}
