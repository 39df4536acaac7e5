//! Multi-player board with derived pseudo-legal move indices.
//!
//! `Board` owns the grid, the disabled-square mask, per-color en-passant and
//! castling-path records, and three move indices rebuilt by
//! `recompute_moves`:
//! - per-color move lists,
//! - per-square "moves landing here" (used for check detection),
//! - per-square "moves originating here" (used for move lookup by square).
//!
//! The indices are only trustworthy right after a recompute. Move commands
//! mutate squares without touching them, so callers recompute after every
//! execute/undo before asking legality questions.

use std::fmt::Write;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::piece_moves::generate_piece_moves;
use crate::moves::move_descriptions::PseudoMove;

/// Per-color pawn geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorGeometry {
    pub facing: Facing,
    /// Coordinate along `facing` on which this color's pawns promote.
    pub promotion_line: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    squares: Vec<Option<Piece>>,
    disabled: Vec<bool>,

    geometry: Vec<ColorGeometry>,
    disabled_colors: Vec<bool>,
    king_locations: Vec<Point>,
    en_passant: Vec<EnPassant>,
    vulnerables: Vec<Vulnerable>,

    moves: Vec<Vec<PseudoMove>>,
    moves_to: Vec<Vec<PseudoMove>>,
    moves_from: Vec<Vec<PseudoMove>>,
}

impl Board {
    /// Empty board with every square enabled. Colors start with a default
    /// north-facing geometry; layouts override it per color.
    pub fn new(width: i32, height: i32, player_count: usize) -> ChessResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChessError::InvalidLayout(format!(
                "board dimensions must be positive, got {width}x{height}"
            )));
        }
        if player_count < 2 {
            return Err(ChessError::NotEnoughPlayers(player_count));
        }
        if player_count > MAX_PLAYERS {
            return Err(ChessError::TooManyPlayers(player_count));
        }

        let area = (width * height) as usize;
        Ok(Self {
            width,
            height,
            squares: vec![None; area],
            disabled: vec![false; area],
            geometry: vec![
                ColorGeometry {
                    facing: Facing::North,
                    promotion_line: height - 1,
                };
                player_count
            ],
            disabled_colors: vec![false; player_count],
            king_locations: vec![Point::NONE; player_count],
            en_passant: vec![EnPassant::NONE; player_count],
            vulnerables: vec![Vulnerable::NONE; player_count],
            moves: vec![Vec::with_capacity(64); player_count],
            moves_to: vec![Vec::new(); area],
            moves_from: vec![Vec::new(); area],
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.geometry.len()
    }

    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    #[inline]
    fn index(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn point_at(&self, index: usize) -> Point {
        let index = index as i32;
        Point::new(index % self.width, index / self.width)
    }

    /// On the board and not disabled.
    #[inline]
    pub fn is_enabled(&self, point: Point) -> bool {
        self.index(point).is_some_and(|idx| !self.disabled[idx])
    }

    #[inline]
    pub fn is_disabled_square(&self, point: Point) -> bool {
        self.index(point).is_some_and(|idx| self.disabled[idx])
    }

    /// Piece on an enabled square; `None` for empty, off-board or disabled.
    #[inline]
    pub fn piece_at(&self, point: Point) -> Option<Piece> {
        self.index(point)
            .filter(|&idx| !self.disabled[idx])
            .and_then(|idx| self.squares[idx])
    }

    /// Like `piece_at`, but off-board and disabled squares are an error.
    pub fn read_square(&self, point: Point) -> ChessResult<Option<Piece>> {
        match self.index(point) {
            Some(idx) if !self.disabled[idx] => Ok(self.squares[idx]),
            _ => Err(ChessError::InvalidSquare(point)),
        }
    }

    pub(crate) fn write_square(&mut self, point: Point, piece: Option<Piece>) -> ChessResult<()> {
        match self.index(point) {
            Some(idx) if !self.disabled[idx] => {
                self.squares[idx] = piece;
                Ok(())
            }
            _ => Err(ChessError::InvalidSquare(point)),
        }
    }

    /// Places a piece during setup.
    pub fn place(&mut self, point: Point, piece: Piece) -> ChessResult<()> {
        if piece.color >= self.player_count() {
            return Err(ChessError::DuplicateColor(piece.color));
        }
        self.write_square(point, Some(piece))
    }

    /// Removes a square from play. Fails if a piece stands on it.
    pub fn disable_square(&mut self, point: Point) -> ChessResult<()> {
        let idx = self.index(point).ok_or(ChessError::InvalidSquare(point))?;
        if self.squares[idx].is_some() {
            return Err(ChessError::InvalidLayout(format!(
                "cannot disable occupied square {point}"
            )));
        }
        self.disabled[idx] = true;
        Ok(())
    }

    pub fn set_geometry(&mut self, color: Color, geometry: ColorGeometry) -> ChessResult<()> {
        let slot = self
            .geometry
            .get_mut(color)
            .ok_or(ChessError::DuplicateColor(color))?;
        *slot = geometry;
        Ok(())
    }

    #[inline]
    pub fn geometry(&self, color: Color) -> ColorGeometry {
        self.geometry[color]
    }

    #[inline]
    pub fn is_promotion_square(&self, color: Color, point: Point) -> bool {
        let geometry = self.geometry[color];
        geometry.facing.axis_coordinate(point) == geometry.promotion_line
    }

    #[inline]
    pub fn king_location(&self, color: Color) -> Point {
        self.king_locations[color]
    }

    #[inline]
    pub fn has_king(&self, color: Color) -> bool {
        !self.king_locations[color].is_none()
    }

    #[inline]
    pub fn en_passant(&self, color: Color) -> EnPassant {
        self.en_passant[color]
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, color: Color, record: EnPassant) {
        self.en_passant[color] = record;
    }

    #[inline]
    pub fn vulnerable(&self, color: Color) -> Vulnerable {
        self.vulnerables[color]
    }

    #[inline]
    pub(crate) fn set_vulnerable(&mut self, color: Color, rect: Vulnerable) {
        self.vulnerables[color] = rect;
    }

    /// Pieces of a disabled color stay on the board but never move.
    #[inline]
    pub fn is_color_disabled(&self, color: Color) -> bool {
        self.disabled_colors[color]
    }

    #[inline]
    pub(crate) fn set_color_disabled(&mut self, color: Color, disabled: bool) {
        self.disabled_colors[color] = disabled;
    }

    /// Pseudo-legal moves of `color`, ally defense included.
    #[inline]
    pub fn moves_for(&self, color: Color) -> &[PseudoMove] {
        &self.moves[color]
    }

    #[inline]
    pub fn moves_to(&self, point: Point) -> &[PseudoMove] {
        match self.index(point) {
            Some(idx) => &self.moves_to[idx],
            None => &[],
        }
    }

    #[inline]
    pub fn moves_from(&self, point: Point) -> &[PseudoMove] {
        match self.index(point) {
            Some(idx) => &self.moves_from[idx],
            None => &[],
        }
    }

    /// Occupied enabled squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(move |(idx, square)| {
            if self.disabled[idx] {
                return None;
            }
            square.map(|piece| (self.point_at(idx), piece))
        })
    }

    pub fn disabled_squares(&self) -> impl Iterator<Item = Point> + '_ {
        self.disabled
            .iter()
            .enumerate()
            .filter(|(_, &disabled)| disabled)
            .map(move |(idx, _)| self.point_at(idx))
    }

    /// Rebuilds every move index from the current squares.
    ///
    /// Buffers are cleared and refilled, so steady-state calls do not
    /// allocate once the lists have grown to their working size.
    pub fn recompute_moves(&mut self) {
        let mut moves = std::mem::take(&mut self.moves);
        for list in &mut moves {
            list.clear();
        }

        let mut kings = [Point::NONE; MAX_PLAYERS];
        for idx in 0..self.squares.len() {
            if self.disabled[idx] {
                continue;
            }
            let Some(piece) = self.squares[idx] else {
                continue;
            };
            if self.disabled_colors[piece.color] {
                continue;
            }
            let from = self.point_at(idx);
            if piece.kind == PieceKind::King {
                kings[piece.color] = from;
            }
            generate_piece_moves(self, from, piece, &mut moves[piece.color]);
        }
        self.moves = moves;

        for (color, location) in self.king_locations.iter_mut().enumerate() {
            *location = kings[color];
        }

        for list in &mut self.moves_to {
            list.clear();
        }
        for list in &mut self.moves_from {
            list.clear();
        }
        let width = self.width;
        for list in &self.moves {
            for mv in list {
                let to = (mv.to.y * width + mv.to.x) as usize;
                let from = (mv.from.y * width + mv.from.x) as usize;
                self.moves_to[to].push(*mv);
                self.moves_from[from].push(*mv);
            }
        }
    }

    /// Appends a canonical text form of the position (squares, disabled
    /// colors, en-passant and castling-path records) to `out`.
    pub fn write_canonical_key(&self, out: &mut String) {
        for (idx, square) in self.squares.iter().enumerate() {
            if self.disabled[idx] {
                out.push('#');
                continue;
            }
            match square {
                None => out.push('.'),
                Some(piece) => {
                    out.push(piece.kind.letter());
                    let _ = write!(out, "{}", piece.color);
                    if piece.moved {
                        out.push('+');
                    }
                }
            }
        }
        for color in 0..self.player_count() {
            let ep = self.en_passant[color];
            let v = self.vulnerables[color];
            let _ = write!(
                out,
                "|{}{},{},{},{},{},{},{},{}",
                if self.disabled_colors[color] { 'x' } else { 'o' },
                ep.target.x,
                ep.target.y,
                ep.risk.x,
                ep.risk.y,
                v.start.x,
                v.start.y,
                v.end.x,
                v.end.y
            );
        }
    }
}
