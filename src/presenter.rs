//! Pure formatting: a board as fixed-width text art, a move list as
//! numbered algebraic pairs. Nothing here mutates or evaluates anything.

use crate::board::Board;
use crate::piece::{Color, Piece, PieceType};
use std::collections::BTreeMap;

/// A persisted move row as the hosting service hands it back: 1-based
/// half-move number, the player who made it, and its notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub number: u32,
    pub player: String,
    pub notation: String,
}

const FILE_LABELS: &str = "    a   b   c   d   e   f   g   h  \n";
const GRID_LINE: &str = "  +---+---+---+---+---+---+---+---+\n";

/// Text art with figurine glyphs, file labels above and below and rank
/// labels on both sides.
pub fn pretty_board(board: &Board) -> String {
    render_board(board, unicode_glyph)
}

/// Same grid with plain letters, for terminals without the figurines.
pub fn pretty_board_ascii(board: &Board) -> String {
    render_board(board, ascii_glyph)
}

fn render_board(board: &Board, glyph: fn(&Piece) -> char) -> String {
    let mut out = String::from(FILE_LABELS);
    out.push_str(GRID_LINE);
    for rank in (0..8).rev() {
        out.push_str(&format!("{} |", rank + 1));
        for file in 0..8 {
            match board.piece_at(rank * 8 + file) {
                Some(piece) => out.push_str(&format!(" {} |", glyph(&piece))),
                None => out.push_str("   |"),
            }
        }
        out.push_str(&format!(" {}\n", rank + 1));
        out.push_str(GRID_LINE);
    }
    out.push_str(FILE_LABELS);
    out
}

fn unicode_glyph(piece: &Piece) -> char {
    match (piece.piece_type, piece.color) {
        (PieceType::Pawn, Color::White) => '♙',
        (PieceType::Knight, Color::White) => '♘',
        (PieceType::Bishop, Color::White) => '♗',
        (PieceType::Rook, Color::White) => '♖',
        (PieceType::Queen, Color::White) => '♕',
        (PieceType::King, Color::White) => '♔',
        (PieceType::Pawn, Color::Black) => '♟',
        (PieceType::Knight, Color::Black) => '♞',
        (PieceType::Bishop, Color::Black) => '♝',
        (PieceType::Rook, Color::Black) => '♜',
        (PieceType::Queen, Color::Black) => '♛',
        (PieceType::King, Color::Black) => '♚',
    }
}

fn ascii_glyph(piece: &Piece) -> char {
    let letter = piece.piece_type.notation_letter();
    match piece.color {
        Color::White => letter,
        Color::Black => letter.to_ascii_lowercase(),
    }
}

/// Groups moves into 1-based pairs and renders `"N. white black"` lines;
/// a pair missing its white half renders as `"N... black"`. Rows naming
/// neither player are dropped.
pub fn format_move_history(moves: &[MoveRecord], white_player: &str, black_player: &str) -> String {
    let mut pairs: BTreeMap<u32, (Option<&str>, Option<&str>)> = BTreeMap::new();
    for mv in moves {
        let pair_number = (mv.number + 1) / 2;
        let entry = pairs.entry(pair_number).or_default();
        if mv.player == white_player {
            entry.0 = Some(&mv.notation);
        } else if mv.player == black_player {
            entry.1 = Some(&mv.notation);
        }
    }

    let mut lines = Vec::new();
    for (number, halves) in pairs {
        match halves {
            (Some(white), Some(black)) => lines.push(format!("{}. {} {}", number, white, black)),
            (Some(white), None) => lines.push(format!("{}. {}", number, white)),
            (None, Some(black)) => lines.push(format!("{}... {}", number, black)),
            (None, None) => (),
        }
    }
    lines.join("\n")
}
