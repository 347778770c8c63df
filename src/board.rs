use crate::error::RulesError;
use crate::piece::{Color, Piece, PieceType};
use crate::square::{file_of, rank_of, square_representation, Square};
use log::trace;
use std::fmt::{Display, Formatter};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Raw outcome of a move application, before any rules are consulted:
/// whether something was captured, the kind now standing on the target
/// square, and whether a promotion took place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub capture: Option<Piece>,
    pub kind: PieceType,
    pub promoted: bool,
}

/// An 8x8 mailbox of piece values plus the ordered capture list. The board
/// has plain value semantics: `clone` produces a fully independent position,
/// which is all the check-safety simulation needs.
#[derive(Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
    captured: Vec<Piece>,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            captured: Vec::new(),
        }
    }

    /// Standard initial layout.
    pub fn standard() -> Board {
        let mut board = Board::empty();
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            board.place_piece(Piece::new(piece_type, Color::White, file), file);
            board.place_piece(Piece::new(piece_type, Color::Black, 56 + file), 56 + file);
        }
        for file in 0..8 {
            board.place_piece(Piece::new(PieceType::Pawn, Color::White, 8 + file), 8 + file);
            board.place_piece(Piece::new(PieceType::Pawn, Color::Black, 48 + file), 48 + file);
        }
        board
    }

    /// Sets the square and updates the piece's stored position. No legality
    /// check of any kind.
    pub fn place_piece(&mut self, mut piece: Piece, sq: Square) {
        piece.square = sq;
        self.squares[sq] = Some(piece);
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares.get(sq).copied().flatten()
    }

    /// Unconditional move application. Fails when `from` is empty or `to`
    /// holds a same-color piece; everything else goes through, legal or not.
    /// A pawn reaching the last rank is replaced by a piece of the requested
    /// kind (queen when the request is absent or unusable), and a king
    /// travelling two files drags the matching rook across.
    pub fn move_piece(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveOutcome, RulesError> {
        let piece = self.piece_at(from).ok_or(RulesError::NoPieceAtSource)?;
        let target = self.piece_at(to);

        if let Some(t) = target {
            if t.color == piece.color {
                return Err(RulesError::IllegalCapture);
            }
            self.captured.push(t);
        }

        self.squares[from] = None;
        let mut moved = piece;
        moved.has_moved = true;
        self.place_piece(moved, to);

        if piece.piece_type == PieceType::King && file_of(from).abs_diff(file_of(to)) == 2 {
            self.relocate_castling_rook(from, to);
        }

        let promoted = piece.piece_type == PieceType::Pawn && (rank_of(to) == 0 || rank_of(to) == 7);
        let kind = if promoted {
            let kind = match promotion {
                Some(PieceType::Pawn) | Some(PieceType::King) | None => PieceType::Queen,
                Some(k) => k,
            };
            self.place_piece(Piece::new(kind, piece.color, to), to);
            kind
        } else {
            piece.piece_type
        };

        trace!(
            "applied {} {} -> {}{}",
            piece.piece_type.name(),
            square_representation(from).unwrap_or_default(),
            square_representation(to).unwrap_or_default(),
            if promoted { " (promotion)" } else { "" }
        );

        Ok(MoveOutcome {
            capture: target,
            kind,
            promoted,
        })
    }

    // The king has already landed on the g- or c-file of its back rank; the
    // rook hops to the square the king crossed.
    fn relocate_castling_rook(&mut self, from: Square, to: Square) {
        let rank = rank_of(from);
        let (rook_from, rook_to) = if file_of(to) > file_of(from) {
            (rank * 8 + 7, rank * 8 + 5)
        } else {
            (rank * 8, rank * 8 + 3)
        };
        if let Some(mut rook) = self.piece_at(rook_from) {
            if rook.piece_type == PieceType::Rook {
                self.squares[rook_from] = None;
                rook.has_moved = true;
                self.place_piece(rook, rook_to);
            }
        }
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.squares.iter().flatten().find_map(|p| {
            if p.piece_type == PieceType::King && p.color == color {
                Some(p.square)
            } else {
                None
            }
        })
    }

    pub fn pieces_for(&self, color: Color) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.color == color)
            .copied()
            .collect()
    }

    /// Captured pieces in the order they were taken.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Occupancy encoding, rank 8 down to rank 1, empty runs as digits,
    /// uppercase for white and lowercase for black.
    pub fn to_position_string(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push_str(&p.to_string());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Decodes an occupancy string produced by [`Board::to_position_string`]
    /// (or the first field of a full position string). Pieces land on the
    /// coordinates implied by rank/file order, with fresh has-moved flags.
    pub fn from_position_string(s: &str) -> Result<Board, RulesError> {
        let placement = s.split(' ').next().unwrap_or("");
        let bad = || RulesError::InvalidPositionString(s.to_string());

        let mut board = Board::empty();
        for (i, rank_str) in placement.split('/').enumerate() {
            if i >= 8 {
                return Err(bad());
            }
            let rank = 7 - i;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file >= 8 {
                        return Err(bad());
                    }
                    let sq = rank * 8 + file;
                    let piece = Piece::from_char(c, sq).ok_or_else(bad)?;
                    board.place_piece(piece, sq);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(bad());
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    None => write!(f, ". ")?,
                    Some(p) => write!(f, "{} ", p)?,
                }
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
