use crate::board::{Board, MoveOutcome};
use crate::error::RulesError;
use crate::history::PlayedMove;
use crate::piece::{Color, PieceType};
use crate::rules;
use crate::square::{file_of, parse_square, rank_of, square_representation, Square};
use log::debug;

/// Everything a collaborator needs to persist or display after a move: the
/// new position string, the synthesized notation, and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub position: String,
    pub notation: String,
    pub capture: bool,
    pub check: bool,
    pub checkmate: bool,
    pub castling: bool,
    pub en_passant: bool,
    pub promotion: bool,
}

/// Turn orchestration over one board: validates incoming moves, applies
/// them, keeps the history, and serializes the position. No terminal state
/// is tracked; deciding when a game is over is the caller's concern.
pub struct Game {
    board: Board,
    side_to_move: Color,
    history: Vec<PlayedMove>,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            history: Vec::new(),
        }
    }

    /// Restores a game from a position string: occupancy plus active color.
    /// Castling-rights, en-passant and clock fields are accepted
    /// syntactically but carry no state here.
    pub fn from_position_string(s: &str) -> Result<Game, RulesError> {
        let mut parts = s.split_whitespace();
        let placement = parts
            .next()
            .ok_or_else(|| RulesError::InvalidPositionString(s.to_string()))?;
        let board = Board::from_position_string(placement)?;
        let side_to_move = match parts.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(RulesError::InvalidPositionString(s.to_string())),
        };
        Ok(Game {
            board,
            side_to_move,
            history: Vec::new(),
        })
    }

    /// Validates and applies one move given as a pair of coordinates and an
    /// optional promotion piece name ("queen", "rook", "bishop", "knight",
    /// or a single letter). Unrecognized promotion names fall back to queen.
    pub fn make_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<&str>,
    ) -> Result<MoveReport, RulesError> {
        let origin = parse_square(from)?;
        let target = parse_square(to)?;

        let piece = self
            .board
            .piece_at(origin)
            .ok_or(RulesError::NoPieceAtSource)?;
        if piece.color != self.side_to_move {
            return Err(RulesError::WrongTurn);
        }
        if !rules::legal_moves_for(&self.board, origin).contains(&target) {
            return Err(RulesError::IllegalMove);
        }

        let promotion_kind =
            promotion.map(|name| PieceType::from_name(name).unwrap_or(PieceType::Queen));
        let outcome = self.board.move_piece(origin, target, promotion_kind)?;

        self.side_to_move = self.side_to_move.opposite();
        let check = rules::in_check(&self.board, self.side_to_move);
        let checkmate = rules::in_checkmate(&self.board, self.side_to_move);

        let moved_kind = if outcome.promoted {
            PieceType::Pawn
        } else {
            outcome.kind
        };
        let notation = notation_for(origin, target, moved_kind, &outcome, check, checkmate);
        self.history.push(PlayedMove {
            origin,
            target,
            piece_type: moved_kind,
            notation: notation.clone(),
        });
        debug!(
            "{} played {}, {} to move",
            self.side_to_move.opposite().name(),
            notation,
            self.side_to_move.name()
        );

        Ok(MoveReport {
            position: self.to_position_string(),
            notation,
            capture: outcome.capture.is_some(),
            check,
            checkmate,
            castling: self.is_castling_move(origin, target),
            en_passant: self.is_en_passant_move(origin, target),
            promotion: outcome.promoted,
        })
    }

    /// Legal destinations for the piece on the given coordinate; empty when
    /// the square is empty or holds a piece of the side not to move.
    pub fn legal_moves_for(&self, position: &str) -> Result<Vec<Square>, RulesError> {
        let origin = parse_square(position)?;
        match self.board.piece_at(origin) {
            Some(piece) if piece.color == self.side_to_move => {
                Ok(rules::legal_moves_for(&self.board, origin))
            }
            _ => Ok(Vec::new()),
        }
    }

    pub fn in_check(&self, color: Color) -> bool {
        rules::in_check(&self.board, color)
    }

    pub fn in_checkmate(&self, color: Color) -> bool {
        rules::in_checkmate(&self.board, color)
    }

    pub fn in_stalemate(&self, color: Color) -> bool {
        rules::in_stalemate(&self.board, color)
    }

    /// Occupancy and active color; the castling-rights, en-passant and clock
    /// fields are fixed placeholders since none of that state is tracked.
    pub fn to_position_string(&self) -> String {
        format!(
            "{} {} KQkq - 0 1",
            self.board.to_position_string(),
            self.side_to_move
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    // A king that just crossed two files can only have castled.
    fn is_castling_move(&self, origin: Square, target: Square) -> bool {
        match self.board.piece_at(target) {
            Some(piece) if piece.piece_type == PieceType::King => {
                file_of(origin).abs_diff(file_of(target)) == 2
            }
            _ => false,
        }
    }

    // Inferred from the board after application, for reporting only: a pawn
    // that changed file onto a square whose origin-rank neighbor is empty.
    fn is_en_passant_move(&self, origin: Square, target: Square) -> bool {
        match self.board.piece_at(target) {
            Some(piece) if piece.piece_type == PieceType::Pawn => {
                file_of(origin) != file_of(target)
                    && self
                        .board
                        .piece_at(rank_of(origin) * 8 + file_of(target))
                        .is_none()
            }
            _ => false,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

fn notation_for(
    origin: Square,
    target: Square,
    moved_kind: PieceType,
    outcome: &MoveOutcome,
    check: bool,
    checkmate: bool,
) -> String {
    let mut notation = String::new();
    let capture = outcome.capture.is_some();

    if moved_kind == PieceType::Pawn {
        if capture {
            notation.push((b'a' + file_of(origin) as u8) as char);
            notation.push('x');
        }
    } else {
        notation.push(moved_kind.notation_letter());
        if capture {
            notation.push('x');
        }
    }
    notation.push_str(&square_representation(target).unwrap_or_default());
    if outcome.promoted {
        notation.push('=');
        notation.push(outcome.kind.notation_letter());
    }
    if checkmate {
        notation.push('#');
    } else if check {
        notation.push('+');
    }
    notation
}
