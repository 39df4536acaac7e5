//! Pseudo-legal move records and the external move key.
//!
//! `PseudoMove` is what the board's move indices store: a compact `Copy`
//! description of a candidate move. It is turned into a reversible
//! `Move` command only when a caller wants to play it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Color, PieceKind, Point};

/// Variant of a candidate move; selects the `Move` constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Simple,
    Promotion,
    /// Double pawn push that exposes an en-passant target.
    RevealEnPassant,
    CaptureEnPassant,
    Castle { rook_from: Point, rook_to: Point },
    /// Target square holds an ally. Counted for mobility only.
    AllyDefense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PseudoMove {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub piece: PieceKind,
    pub kind: MoveKind,
}

impl PseudoMove {
    #[inline]
    pub const fn new(from: Point, to: Point, color: Color, piece: PieceKind, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            color,
            piece,
            kind,
        }
    }

    #[inline]
    pub const fn is_ally_defense(&self) -> bool {
        matches!(self.kind, MoveKind::AllyDefense)
    }

    /// True if this move would capture whatever stands on `to`.
    ///
    /// Pawn pushes, castling and ally defense never threaten their target.
    pub fn attacks(&self) -> bool {
        match self.kind {
            MoveKind::AllyDefense | MoveKind::Castle { .. } | MoveKind::RevealEnPassant => false,
            MoveKind::CaptureEnPassant => true,
            MoveKind::Simple | MoveKind::Promotion => {
                !(self.piece == PieceKind::Pawn && (self.from.x == self.to.x || self.from.y == self.to.y))
            }
        }
    }

    /// External key; promotions default to a queen.
    pub fn key(&self) -> MoveKey {
        let promotion = match self.kind {
            MoveKind::Promotion => Some(PieceKind::Queen),
            _ => None,
        };
        MoveKey::new(self.from, self.to, promotion)
    }
}

/// Move identifier handed across the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveKey {
    pub x_from: i32,
    pub y_from: i32,
    pub x_to: i32,
    pub y_to: i32,
    pub promotion: Option<PieceKind>,
}

impl MoveKey {
    pub const fn new(from: Point, to: Point, promotion: Option<PieceKind>) -> Self {
        Self {
            x_from: from.x,
            y_from: from.y,
            x_to: to.x,
            y_to: to.y,
            promotion,
        }
    }

    #[inline]
    pub const fn from(&self) -> Point {
        Point::new(self.x_from, self.y_from)
    }

    #[inline]
    pub const fn to(&self) -> Point {
        Point::new(self.x_to, self.y_to)
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter())?;
        }
        Ok(())
    }
}
