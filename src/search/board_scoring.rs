//! Per-player evaluation as shares of the table total.
//!
//! Each living player is scored on their share of the combined material
//! (plus pawn advancement) and of the combined mobility, so the vector
//! orders any number of players without pairwise comparisons:
//!
//! `score = 10 * share(material + position) + share(mobility)`
//!
//! where `share(x) = round(x / total(x) * 10000)`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::player_state::PlayerState;

pub const WIN_SCORE: i32 = i32::MAX;
pub const LOSS_SCORE: i32 = i32::MIN;

const SHARE_SCALE: i64 = 10_000;
const MATERIAL_WEIGHT: i32 = 10;
const PAWN_ADVANCE_BONUS: i32 = 5;

pub trait BoardScorer: Send + Sync {
    /// One score per color, higher is better for that color.
    fn score(&self, board: &Board, players: &PlayerState) -> Scores;
}

/// Rounded share of `part` in `total`, scaled to `SHARE_SCALE`.
#[inline]
pub fn share(part: i32, total: i32) -> i32 {
    if total <= 0 {
        return 0;
    }
    let part = i64::from(part.max(0));
    let total = i64::from(total);
    ((2 * part * SHARE_SCALE + total) / (2 * total)) as i32
}

#[derive(Debug, Clone)]
pub struct ShareScorer {
    width: i32,
    /// Pawn bonus per color, indexed by square.
    pawn_tables: Vec<Vec<i32>>,
}

impl ShareScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Precomputes pawn tables from the board's geometry. The bonus grows
    /// by a fixed step for every square closer to the promotion line.
    pub fn for_board(board: &Board) -> Self {
        let (width, height) = (board.width(), board.height());
        let squares: Vec<Point> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
            .collect();

        let pawn_tables = (0..board.player_count())
            .map(|color| {
                let geometry = board.geometry(color);
                let distance = |p: Point| (geometry.promotion_line - geometry.facing.axis_coordinate(p)).abs();
                let farthest = squares
                    .iter()
                    .filter(|&&p| board.is_enabled(p))
                    .map(|&p| distance(p))
                    .max()
                    .unwrap_or(0);
                squares
                    .iter()
                    .map(|&p| (farthest - distance(p)) * PAWN_ADVANCE_BONUS)
                    .collect()
            })
            .collect();

        Self { width, pawn_tables }
    }

    #[inline]
    fn position_value(&self, color: Color, at: Point) -> i32 {
        self.pawn_tables
            .get(color)
            .and_then(|table| table.get((at.y * self.width + at.x) as usize))
            .copied()
            .unwrap_or(0)
    }

    fn terminal_scores(board: &Board, players: &PlayerState) -> Scores {
        let mut scores = [0; MAX_PLAYERS];
        if let Some(winner) = players.winner() {
            for (color, slot) in scores.iter_mut().enumerate().take(board.player_count()) {
                *slot = if color == winner { WIN_SCORE } else { LOSS_SCORE };
            }
        }
        scores
    }
}

impl BoardScorer for ShareScorer {
    fn score(&self, board: &Board, players: &PlayerState) -> Scores {
        if players.is_game_over() {
            return Self::terminal_scores(board, players);
        }

        let n = board.player_count();
        let mut material = [0i32; MAX_PLAYERS];
        let mut mobility = [0i32; MAX_PLAYERS];

        for (at, piece) in board.pieces() {
            let mut value = Self::piece_value(piece.kind);
            if piece.kind == PieceKind::Pawn {
                value += self.position_value(piece.color, at);
            }
            material[piece.color] += value;
        }
        for (color, slot) in mobility.iter_mut().enumerate().take(n) {
            *slot = board
                .moves_for(color)
                .iter()
                .filter(|m| !matches!(m.piece, PieceKind::Queen | PieceKind::King))
                .count() as i32;
        }

        let alive = |color: Color| players.is_alive(color);
        let material_total: i32 = (0..n).filter(|&c| alive(c)).map(|c| material[c]).sum();
        let mobility_total: i32 = (0..n).filter(|&c| alive(c)).map(|c| mobility[c]).sum();

        let mut scores = [0; MAX_PLAYERS];
        for (color, slot) in scores.iter_mut().enumerate().take(n) {
            *slot = if alive(color) {
                MATERIAL_WEIGHT * share(material[color], material_total) + share(mobility[color], mobility_total)
            } else {
                LOSS_SCORE
            };
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{standard_four_player, standard_two_player};
    use crate::move_generation::transition::{Transition, Verdict};
    use crate::utils::board_text::parse_position;

    #[test]
    fn share_rounds_and_handles_empty_totals() {
        assert_eq!(share(1, 3), 3333);
        assert_eq!(share(2, 3), 6667);
        assert_eq!(share(5, 0), 0);
    }

    #[test]
    fn symmetric_starts_split_evenly() {
        let (board, players) = standard_two_player().expect("layout");
        let scores = ShareScorer::for_board(&board).score(&board, &players);
        assert_eq!(&scores[..2], &[55_000, 55_000]);

        let (board, players) = standard_four_player().expect("layout");
        let scores = ShareScorer::for_board(&board).score(&board, &players);
        assert_eq!(scores, [27_500; 4]);
    }

    #[test]
    fn extra_material_raises_the_share() {
        let (board, players) = parse_position(
            "
            .. .. .. K1
            .. .. .. ..
            .. .. R0 ..
            K0 .. .. ..
            ",
            2,
        )
        .expect("layout should parse");
        let scores = ShareScorer::for_board(&board).score(&board, &players);
        assert!(scores[0] > scores[1]);
        // Rook is all of the material.
        assert!(scores[0] >= 100_000);
    }

    #[test]
    fn finished_games_score_at_the_bounds() {
        let (mut board, mut players) = standard_two_player().expect("layout");
        let scorer = ShareScorer::for_board(&board);
        Transition::new(&players, Verdict::CHECKMATE).execute(&mut players, &mut board);
        let scores = scorer.score(&board, &players);
        assert_eq!(scores[0], LOSS_SCORE);
        assert_eq!(scores[1], WIN_SCORE);

        let (mut board, mut players) = standard_two_player().expect("layout");
        Transition::new(&players, Verdict::STALEMATE).execute(&mut players, &mut board);
        assert_eq!(scorer.score(&board, &players), [0; MAX_PLAYERS]);
    }

    #[test]
    fn dead_players_score_the_minimum() {
        let (mut board, mut players) = standard_four_player().expect("layout");
        let scorer = ShareScorer::for_board(&board);
        Transition::new(&players, Verdict::CHECKMATE).execute(&mut players, &mut board);
        board.recompute_moves();
        let scores = scorer.score(&board, &players);
        assert_eq!(scores[0], LOSS_SCORE);
        assert!(scores[1..].iter().all(|&s| s > 30_000));
    }
}
