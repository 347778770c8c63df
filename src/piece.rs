use crate::square::Square;
use std::fmt::{Display, Formatter};

/// A piece is a plain value owned by the board slot it occupies; `square`
/// mirrors that slot and is kept in sync by `Board::place_piece`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Uppercase letter used in algebraic notation.
    pub fn notation_letter(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Looks a piece kind up by its spelled-out name or its single-letter
    /// abbreviation. Used for promotion choices coming in from collaborators.
    pub fn from_name(name: &str) -> Option<PieceType> {
        match name.to_lowercase().as_str() {
            "pawn" | "p" => Some(PieceType::Pawn),
            "knight" | "n" => Some(PieceType::Knight),
            "bishop" | "b" => Some(PieceType::Bishop),
            "rook" | "r" => Some(PieceType::Rook),
            "queen" | "q" => Some(PieceType::Queen),
            "king" | "k" => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PieceType::Pawn => "p",
                PieceType::Knight => "n",
                PieceType::Bishop => "b",
                PieceType::Rook => "r",
                PieceType::Queen => "q",
                PieceType::King => "k",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Color::Black { "b" } else { "w" })
    }
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color, square: Square) -> Piece {
        Piece {
            piece_type,
            color,
            square,
            has_moved: false,
        }
    }

    /// Builds a piece from its position-string letter: uppercase is white,
    /// lowercase is black.
    pub fn from_char(c: char, square: Square) -> Option<Piece> {
        let piece_type = match c.to_lowercase().next().unwrap_or('_') {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if c.is_lowercase() {
            Color::Black
        } else {
            Color::White
        };
        Some(Piece::new(piece_type, color, square))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == Color::White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}
