//! Board layouts: a small builder plus the standard two- and four-player
//! starting positions.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::{Board, ColorGeometry};
use crate::game_state::chess_types::*;
use crate::game_state::player_state::PlayerState;

/// Back rank read from the seat's left-hand corner, as the seated player
/// sees it.
pub const BACK_RANK_KING_RIGHT: &str = "RNBQKBNR";
pub const BACK_RANK_KING_LEFT: &str = "RNBKQBNR";

#[derive(Debug, Clone, Copy)]
struct Seat {
    color: Color,
    geometry: ColorGeometry,
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    at: Point,
    color: Color,
    kind: PieceKind,
    moved: bool,
}

/// Collects a board description and validates it all at once in `build`.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    width: i32,
    height: i32,
    disabled: Vec<Point>,
    seats: Vec<Seat>,
    placements: Vec<Placement>,
}

impl Layout {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn disable(mut self, at: Point) -> Self {
        self.disabled.push(at);
        self
    }

    /// Disables every square of the inclusive rectangle.
    pub fn disable_rect(mut self, start: Point, end: Point) -> Self {
        self.disabled.extend(Vulnerable::spanning(start, end).points());
        self
    }

    /// Adds a player. Seats move in the order they are added.
    pub fn seat(mut self, color: Color, facing: Facing, promotion_line: i32) -> Self {
        self.seats.push(Seat {
            color,
            geometry: ColorGeometry {
                facing,
                promotion_line,
            },
        });
        self
    }

    pub fn piece(mut self, at: Point, color: Color, kind: PieceKind) -> Self {
        self.placements.push(Placement {
            at,
            color,
            kind,
            moved: false,
        });
        self
    }

    pub fn moved_piece(mut self, at: Point, color: Color, kind: PieceKind) -> Self {
        self.placements.push(Placement {
            at,
            color,
            kind,
            moved: true,
        });
        self
    }

    /// Places `rank` (piece letters) starting at `start` and stepping by
    /// `(dx, dy)`.
    pub fn rank(mut self, start: Point, step: (i32, i32), color: Color, rank: &str) -> Self {
        let mut at = start;
        for letter in rank.chars() {
            if let Some(kind) = PieceKind::from_letter(letter) {
                self = self.piece(at, color, kind);
            }
            at = at.offset(step.0, step.1);
        }
        self
    }

    pub fn build(self) -> ChessResult<(Board, PlayerState)> {
        let order: Vec<Color> = self.seats.iter().map(|seat| seat.color).collect();
        let players = PlayerState::new(&order)?;
        if let Some(&color) = order.iter().find(|&&color| color >= order.len()) {
            return Err(ChessError::DuplicateColor(color));
        }

        let mut board = Board::new(self.width, self.height, order.len())?;
        for seat in &self.seats {
            board.set_geometry(seat.color, seat.geometry)?;
        }
        for &at in &self.disabled {
            board.disable_square(at)?;
        }
        for placement in &self.placements {
            if placement.color >= order.len() {
                return Err(ChessError::InvalidLayout(format!(
                    "piece at {} belongs to unseated color {}",
                    placement.at, placement.color
                )));
            }
            let facing = board.geometry(placement.color).facing;
            let mut piece = Piece::new(placement.color, placement.kind, facing);
            if placement.moved {
                piece = piece.with_moved();
            }
            board.place(placement.at, piece)?;
        }
        board.recompute_moves();
        Ok((board, players))
    }
}

/// 8x8 board, White (0) moves first from the bottom.
pub fn standard_two_player_layout() -> Layout {
    Layout::new(8, 8)
        .seat(0, Facing::North, 7)
        .seat(1, Facing::South, 0)
        .rank(Point::new(0, 0), (1, 0), 0, BACK_RANK_KING_RIGHT)
        .rank(Point::new(0, 1), (1, 0), 0, "PPPPPPPP")
        .rank(Point::new(0, 6), (1, 0), 1, "PPPPPPPP")
        .rank(Point::new(0, 7), (1, 0), 1, BACK_RANK_KING_RIGHT)
}

pub fn standard_two_player() -> ChessResult<(Board, PlayerState)> {
    standard_two_player_layout().build()
}

/// 14x14 cross with the 3x3 corners removed. Red (0) south, Blue (1)
/// west, Yellow (2) north, Green (3) east; pawns promote on the centre
/// line.
pub fn standard_four_player_layout() -> Layout {
    const SIZE: i32 = 14;
    const FAR: i32 = SIZE - 1;
    Layout::new(SIZE, SIZE)
        .disable_rect(Point::new(0, 0), Point::new(2, 2))
        .disable_rect(Point::new(FAR - 2, 0), Point::new(FAR, 2))
        .disable_rect(Point::new(0, FAR - 2), Point::new(2, FAR))
        .disable_rect(Point::new(FAR - 2, FAR - 2), Point::new(FAR, FAR))
        .seat(0, Facing::North, SIZE / 2)
        .seat(1, Facing::East, SIZE / 2)
        .seat(2, Facing::South, SIZE / 2 - 1)
        .seat(3, Facing::West, SIZE / 2 - 1)
        .rank(Point::new(3, 0), (1, 0), 0, BACK_RANK_KING_RIGHT)
        .rank(Point::new(3, 1), (1, 0), 0, "PPPPPPPP")
        .rank(Point::new(0, 3), (0, 1), 1, BACK_RANK_KING_LEFT)
        .rank(Point::new(1, 3), (0, 1), 1, "PPPPPPPP")
        .rank(Point::new(3, FAR), (1, 0), 2, BACK_RANK_KING_LEFT)
        .rank(Point::new(3, FAR - 1), (1, 0), 2, "PPPPPPPP")
        .rank(Point::new(FAR, 3), (0, 1), 3, BACK_RANK_KING_RIGHT)
        .rank(Point::new(FAR - 1, 3), (0, 1), 3, "PPPPPPPP")
}

pub fn standard_four_player() -> ChessResult<(Board, PlayerState)> {
    standard_four_player_layout().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_player_start_has_twenty_moves_each() {
        let (board, players) = standard_two_player().expect("layout");
        assert_eq!(players.current(), 0);
        for color in 0..2 {
            let real = board.moves_for(color).iter().filter(|m| !m.is_ally_defense()).count();
            assert_eq!(real, 20);
        }
        assert_eq!(board.king_location(0), Point::new(4, 0));
        assert_eq!(board.king_location(1), Point::new(4, 7));
    }

    #[test]
    fn four_player_start_is_a_cross_with_four_armies() {
        let (board, players) = standard_four_player().expect("layout");
        assert_eq!(players.player_count(), 4);
        assert_eq!(board.disabled_squares().count(), 36);
        assert_eq!(board.pieces().count(), 64);
        for color in 0..4 {
            let real = board.moves_for(color).iter().filter(|m| !m.is_ally_defense()).count();
            assert_eq!(real, 20, "color {color}");
        }
        assert_eq!(board.king_location(0), Point::new(7, 0));
        assert_eq!(board.king_location(1), Point::new(0, 6));
        assert_eq!(board.king_location(2), Point::new(6, 13));
        assert_eq!(board.king_location(3), Point::new(13, 7));
    }

    #[test]
    fn build_validates_seats_and_squares() {
        let bad_square = Layout::new(4, 4)
            .disable(Point::new(0, 0))
            .seat(0, Facing::North, 3)
            .seat(1, Facing::South, 0)
            .piece(Point::new(0, 0), 0, PieceKind::King)
            .build();
        assert_eq!(bad_square.err(), Some(ChessError::InvalidSquare(Point::new(0, 0))));

        let lonely = Layout::new(4, 4).seat(0, Facing::North, 3).build();
        assert_eq!(lonely.err(), Some(ChessError::NotEnoughPlayers(1)));

        let gap = Layout::new(4, 4)
            .seat(0, Facing::North, 3)
            .seat(2, Facing::South, 0)
            .build();
        assert_eq!(gap.err(), Some(ChessError::DuplicateColor(2)));
    }
}
