//! Value types shared by the board, move commands and search.
//!
//! Everything here is small and `Copy`: pieces are immutable values and
//! "moving" one produces a new value, which keeps undo a plain restore.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on players in one game; sizes the score vectors.
pub const MAX_PLAYERS: usize = 4;

/// Player index. Colors are stable for the lifetime of a game.
pub type Color = usize;

/// One score slot per player, indexed by color.
pub type Scores = [i32; MAX_PLAYERS];

/// Integer grid coordinate, `x` grows east and `y` grows north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Sentinel for "no square" (absent king, inactive records).
    pub const NONE: Point = Point { x: -1, y: -1 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.x == Self::NONE.x && self.y == Self::NONE.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Direction a color's pawns advance in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }

    /// Coordinate along the axis of travel.
    #[inline]
    pub const fn axis_coordinate(self, point: Point) -> i32 {
        match self {
            Facing::North | Facing::South => point.y,
            Facing::East | Facing::West => point.x,
        }
    }
}

/// Piece kind (color is carried separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// Immutable tagged piece value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub moved: bool,
    pub facing: Facing,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, facing: Facing) -> Self {
        Self {
            color,
            kind,
            moved: false,
            facing,
        }
    }

    #[inline]
    pub const fn with_moved(self) -> Self {
        Self {
            moved: true,
            ..self
        }
    }

    #[inline]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self {
            kind,
            moved: true,
            ..self
        }
    }
}

/// Square a pawn can capture onto, and the square holding the pawn that
/// would be removed by that capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    pub target: Point,
    pub risk: Point,
}

impl EnPassant {
    pub const NONE: EnPassant = EnPassant {
        target: Point::NONE,
        risk: Point::NONE,
    };

    #[inline]
    pub const fn is_active(self) -> bool {
        !self.target.is_none()
    }
}

/// Inclusive rectangle of squares a castling king crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vulnerable {
    pub start: Point,
    pub end: Point,
}

impl Vulnerable {
    pub const NONE: Vulnerable = Vulnerable {
        start: Point::NONE,
        end: Point::NONE,
    };

    /// Normalizes the corners so `start <= end` on both axes.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            start: Point::new(a.x.min(b.x), a.y.min(b.y)),
            end: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        !self.start.is_none()
    }

    pub fn contains(self, point: Point) -> bool {
        self.is_active()
            && (self.start.x..=self.end.x).contains(&point.x)
            && (self.start.y..=self.end.y).contains(&point.y)
    }

    pub fn points(self) -> impl Iterator<Item = Point> {
        let Vulnerable { start, end } = self;
        let active = self.is_active();
        (start.y..=end.y)
            .flat_map(move |y| (start.x..=end.x).map(move |x| Point::new(x, y)))
            .filter(move |_| active)
    }
}
