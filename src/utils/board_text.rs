//! Plain-text board format used by tests, logs and the demo binary.
//!
//! One row per line, top row first, whitespace-separated tokens:
//! `..` empty, `##` disabled, `<Kind><color>` a piece (`K0`, `p3`), with a
//! trailing `+` for a piece that has moved. Blank lines are ignored.
//!
//! Parsed boards get the conventional geometry for their player count:
//! two players face north/south and promote on the far rank, more players
//! sit south/west/north/east and promote on the centre lines.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::Layout;
use crate::game_state::chess_types::*;
use crate::game_state::player_state::PlayerState;

fn seat_geometry(players: usize, color: Color, width: i32, height: i32) -> (Facing, i32) {
    if players == 2 {
        return match color {
            0 => (Facing::North, height - 1),
            _ => (Facing::South, 0),
        };
    }
    match color {
        0 => (Facing::North, height / 2),
        1 => (Facing::East, width / 2),
        2 => (Facing::South, height / 2 - 1),
        _ => (Facing::West, width / 2 - 1),
    }
}

fn parse_token(token: &str) -> ChessResult<Option<(PieceKind, Color, bool)>> {
    let bad = || ChessError::InvalidLayout(format!("unknown square token '{token}'"));
    if token == ".." || token == "##" {
        return Ok(None);
    }
    let (body, moved) = match token.strip_suffix('+') {
        Some(body) => (body, true),
        None => (token, false),
    };
    let mut chars = body.chars();
    let kind = chars.next().and_then(PieceKind::from_letter).ok_or_else(bad)?;
    let color: Color = chars.as_str().parse().map_err(|_| bad())?;
    Ok(Some((kind, color, moved)))
}

/// Parses a board and a fresh turn order `0..players`.
pub fn parse_position(text: &str, players: usize) -> ChessResult<(Board, PlayerState)> {
    let rows: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect();
    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |row| row.len()) as i32;
    if rows.iter().any(|row| row.len() as i32 != width) {
        return Err(ChessError::InvalidLayout("rows have different lengths".into()));
    }

    let mut layout = Layout::new(width, height);
    for color in 0..players {
        let (facing, line) = seat_geometry(players, color, width, height);
        layout = layout.seat(color, facing, line);
    }
    for (row, tokens) in rows.iter().enumerate() {
        let y = height - 1 - row as i32;
        for (x, token) in tokens.iter().enumerate() {
            let at = Point::new(x as i32, y);
            if *token == "##" {
                layout = layout.disable(at);
                continue;
            }
            layout = match parse_token(token)? {
                None => layout,
                Some((kind, color, false)) => layout.piece(at, color, kind),
                Some((kind, color, true)) => layout.moved_piece(at, color, kind),
            };
        }
    }
    layout.build()
}

pub fn parse_board(text: &str, players: usize) -> ChessResult<Board> {
    parse_position(text, players).map(|(board, _)| board)
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for y in (0..board.height()).rev() {
        for x in 0..board.width() {
            if x > 0 {
                out.push(' ');
            }
            let at = Point::new(x, y);
            if board.is_disabled_square(at) {
                out.push_str("##");
                continue;
            }
            match board.piece_at(at) {
                None => out.push_str(".."),
                Some(piece) => {
                    out.push(piece.kind.letter());
                    out.push_str(&piece.color.to_string());
                    if piece.moved {
                        out.push('+');
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::standard_four_player;

    #[test]
    fn parse_then_render_is_stable() {
        let text = "## K1 ..\n.. P0+ ..\nR0 .. K0\n";
        let board = parse_board(text, 2).expect("layout should parse");
        assert_eq!(render_board(&board), text);
        assert_eq!(
            board.piece_at(Point::new(1, 1)).map(|p| (p.kind, p.moved, p.facing)),
            Some((PieceKind::Pawn, true, Facing::North))
        );
        assert!(board.is_disabled_square(Point::new(0, 2)));
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(parse_board("K0 ..\nK1", 2), Err(ChessError::InvalidLayout(_))));
        assert!(matches!(parse_board("X0 K1", 2), Err(ChessError::InvalidLayout(_))));
        assert!(matches!(parse_board("K0 Kx", 2), Err(ChessError::InvalidLayout(_))));
    }

    #[test]
    fn four_player_render_shows_the_cross() {
        let (board, _) = standard_four_player().expect("layout");
        let text = render_board(&board);
        let first = text.lines().next().expect("top row");
        assert_eq!(first, "## ## ## R2 N2 B2 K2 Q2 B2 N2 R2 ## ## ##");
        let reparsed = parse_board(&text, 4).expect("reparse");
        assert_eq!(render_board(&reparsed), text);
    }
}
