//! Reversible move command.
//!
//! A `Move` snapshots, at construction, every square it will touch as a
//! pair of delta lists: the state to install on `execute` and the state to
//! restore on `undo`. It also snapshots the mover's en-passant record and
//! vulnerable rectangle. `execute`/`undo` replay those snapshots and never
//! recompute move indices; callers call `Board::recompute_moves` afterwards.

use arrayvec::ArrayVec;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{MoveKey, MoveKind, PseudoMove};

/// Most squares a single move touches: a castle moves two pieces, and an
/// en-passant capture may remove two pawns on the cross board.
pub const MAX_DELTAS: usize = 4;

type Deltas = ArrayVec<(Option<Piece>, Point), MAX_DELTAS>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    from: Point,
    to: Point,
    color: Color,
    kind: MoveKind,
    promotion: Option<PieceKind>,

    new_deltas: Deltas,
    old_deltas: Deltas,

    old_en_passant: EnPassant,
    new_en_passant: EnPassant,
    old_vulnerable: Vulnerable,
    new_vulnerable: Vulnerable,
}

impl Move {
    /// Builds the command for a generated candidate. `promotion` only
    /// matters for promotion moves and defaults to a queen.
    pub fn from_pseudo(board: &Board, candidate: &PseudoMove, promotion: Option<PieceKind>) -> ChessResult<Self> {
        let PseudoMove { from, to, .. } = *candidate;
        match candidate.kind {
            MoveKind::Simple => Self::simple(board, from, to),
            MoveKind::Promotion => Self::promotion(board, from, to, promotion.unwrap_or(PieceKind::Queen)),
            MoveKind::RevealEnPassant => Self::reveal_en_passant(board, from, to),
            MoveKind::CaptureEnPassant => Self::capture_en_passant(board, from, to),
            MoveKind::Castle { rook_from, rook_to } => Self::castle(board, from, to, rook_from, rook_to),
            MoveKind::AllyDefense => Self::ally_defense(board, from, to),
        }
    }

    /// Common skeleton: lifts the piece off `from` and drops `placed` on `to`.
    fn relocation(board: &Board, from: Point, to: Point, kind: MoveKind) -> ChessResult<(Self, Piece)> {
        let piece = board.read_square(from)?.ok_or(ChessError::NoPieceAtSquare(from))?;
        let captured = board.read_square(to)?;

        let mut new_deltas = Deltas::new();
        new_deltas.push((None, from));
        new_deltas.push((Some(piece.with_moved()), to));
        let mut old_deltas = Deltas::new();
        old_deltas.push((Some(piece), from));
        old_deltas.push((captured, to));

        let mv = Self {
            from,
            to,
            color: piece.color,
            kind,
            promotion: None,
            new_deltas,
            old_deltas,
            old_en_passant: board.en_passant(piece.color),
            new_en_passant: EnPassant::NONE,
            old_vulnerable: board.vulnerable(piece.color),
            new_vulnerable: Vulnerable::NONE,
        };
        Ok((mv, piece))
    }

    pub fn simple(board: &Board, from: Point, to: Point) -> ChessResult<Self> {
        Self::relocation(board, from, to, MoveKind::Simple).map(|(mv, _)| mv)
    }

    pub fn promotion(board: &Board, from: Point, to: Point, promote_to: PieceKind) -> ChessResult<Self> {
        if !promote_to.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(promote_to));
        }
        let (mut mv, piece) = Self::relocation(board, from, to, MoveKind::Promotion)?;
        mv.new_deltas[1] = (Some(piece.promoted(promote_to)), to);
        mv.promotion = Some(promote_to);
        Ok(mv)
    }

    /// Double push; the skipped square becomes this color's en-passant
    /// target until it moves again.
    pub fn reveal_en_passant(board: &Board, from: Point, to: Point) -> ChessResult<Self> {
        let (mut mv, _) = Self::relocation(board, from, to, MoveKind::RevealEnPassant)?;
        mv.new_en_passant = EnPassant {
            target: Point::new((from.x + to.x) / 2, (from.y + to.y) / 2),
            risk: to,
        };
        Ok(mv)
    }

    /// Removes the pawn behind every opponent en-passant record whose
    /// target is `to`.
    pub fn capture_en_passant(board: &Board, from: Point, to: Point) -> ChessResult<Self> {
        let (mut mv, _) = Self::relocation(board, from, to, MoveKind::CaptureEnPassant)?;
        for other in 0..board.player_count() {
            if other == mv.color {
                continue;
            }
            let record = board.en_passant(other);
            if !record.is_active() || record.target != to {
                continue;
            }
            // The pawn may already be gone; only remove what the record names.
            match board.piece_at(record.risk) {
                Some(victim) if victim.color == other && victim.kind == PieceKind::Pawn => {
                    mv.new_deltas.push((None, record.risk));
                    mv.old_deltas.push((Some(victim), record.risk));
                }
                _ => {}
            }
        }
        Ok(mv)
    }

    pub fn castle(board: &Board, from: Point, to: Point, rook_from: Point, rook_to: Point) -> ChessResult<Self> {
        let king = board.read_square(from)?.ok_or(ChessError::NoPieceAtSquare(from))?;
        let rook = board
            .read_square(rook_from)?
            .ok_or(ChessError::NoPieceAtSquare(rook_from))?;
        let old_to = board.read_square(to)?;
        let old_rook_to = board.read_square(rook_to)?;

        let mut new_deltas = Deltas::new();
        new_deltas.push((None, from));
        new_deltas.push((None, rook_from));
        new_deltas.push((Some(king.with_moved()), to));
        new_deltas.push((Some(rook.with_moved()), rook_to));
        let mut old_deltas = Deltas::new();
        old_deltas.push((Some(king), from));
        old_deltas.push((Some(rook), rook_from));
        old_deltas.push((old_to, to));
        old_deltas.push((old_rook_to, rook_to));

        Ok(Self {
            from,
            to,
            color: king.color,
            kind: MoveKind::Castle { rook_from, rook_to },
            promotion: None,
            new_deltas,
            old_deltas,
            old_en_passant: board.en_passant(king.color),
            new_en_passant: EnPassant::NONE,
            old_vulnerable: board.vulnerable(king.color),
            new_vulnerable: Vulnerable::spanning(from, rook_to),
        })
    }

    /// Placeholder for "could move here but an ally stands on it". Touches
    /// no squares; only clears the mover's records.
    pub fn ally_defense(board: &Board, from: Point, to: Point) -> ChessResult<Self> {
        let piece = board.read_square(from)?.ok_or(ChessError::NoPieceAtSquare(from))?;
        board.read_square(to)?;
        Ok(Self {
            from,
            to,
            color: piece.color,
            kind: MoveKind::AllyDefense,
            promotion: None,
            new_deltas: Deltas::new(),
            old_deltas: Deltas::new(),
            old_en_passant: board.en_passant(piece.color),
            new_en_passant: EnPassant::NONE,
            old_vulnerable: board.vulnerable(piece.color),
            new_vulnerable: Vulnerable::NONE,
        })
    }

    fn check_squares(board: &Board, deltas: &Deltas) -> ChessResult<()> {
        match deltas.iter().find(|(_, point)| !board.is_enabled(*point)) {
            Some((_, point)) => Err(ChessError::InvalidSquare(*point)),
            None => Ok(()),
        }
    }

    /// Installs the new state. Every square is checked before the first
    /// write, so an error leaves the board untouched.
    pub fn execute(&self, board: &mut Board) -> ChessResult<()> {
        Self::check_squares(board, &self.new_deltas)?;
        for (piece, point) in &self.new_deltas {
            board.write_square(*point, *piece)?;
        }
        board.set_en_passant(self.color, self.new_en_passant);
        board.set_vulnerable(self.color, self.new_vulnerable);
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> ChessResult<()> {
        Self::check_squares(board, &self.old_deltas)?;
        for (piece, point) in self.old_deltas.iter().rev() {
            board.write_square(*point, *piece)?;
        }
        board.set_en_passant(self.color, self.old_en_passant);
        board.set_vulnerable(self.color, self.old_vulnerable);
        Ok(())
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn is_ally_defense(&self) -> bool {
        matches!(self.kind, MoveKind::AllyDefense)
    }

    /// Number of opposing pieces this move removes.
    pub fn captures(&self) -> usize {
        self.old_deltas
            .iter()
            .filter(|(piece, _)| piece.is_some_and(|p| p.color != self.color))
            .count()
    }

    pub fn key(&self) -> MoveKey {
        MoveKey::new(self.from, self.to, self.promotion)
    }
}
