//! Stateless rule evaluation over a board and a color. Legality is
//! pseudo-legality plus king safety, tested by applying the candidate on a
//! cloned board and asking whether the mover's king can then be taken.

use crate::board::Board;
use crate::move_generator::pseudo_legal_moves;
use crate::piece::Color;
use crate::square::{square_representation, Square};
use log::trace;

/// True iff the piece on `from` belongs to `side_to_move` and can reach `to`
/// without leaving its own king attacked.
pub fn legal_move(board: &Board, side_to_move: Color, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) if piece.color == side_to_move => legal_moves_for(board, from).contains(&to),
        _ => false,
    }
}

/// Pseudo-legal destinations of the piece on `origin`, minus every move that
/// would leave that piece's own king attacked.
pub fn legal_moves_for(board: &Board, origin: Square) -> Vec<Square> {
    if board.piece_at(origin).is_none() {
        return Vec::new();
    }
    pseudo_legal_moves(board, origin)
        .into_iter()
        .filter(|&target| {
            let exposes = leaves_king_attacked(board, origin, target);
            if exposes {
                trace!(
                    "{} -> {} rejected, own king would be attacked",
                    square_representation(origin).unwrap_or_default(),
                    square_representation(target).unwrap_or_default()
                );
            }
            !exposes
        })
        .collect()
}

/// True iff some opposing piece's pseudo-legal moves cover `color`'s king.
/// A board with no such king is not in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king_square) => attacked_by(board, king_square, color.opposite()),
        None => false,
    }
}

pub fn in_checkmate(board: &Board, color: Color) -> bool {
    in_check(board, color) && no_legal_moves(board, color)
}

pub fn in_stalemate(board: &Board, color: Color) -> bool {
    !in_check(board, color) && no_legal_moves(board, color)
}

fn no_legal_moves(board: &Board, color: Color) -> bool {
    board
        .pieces_for(color)
        .iter()
        .all(|piece| legal_moves_for(board, piece.square).is_empty())
}

fn attacked_by(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces_for(attacker)
        .iter()
        .any(|piece| pseudo_legal_moves(board, piece.square).contains(&target))
}

// The probe board is a full value copy; nothing it does can touch the real
// position.
fn leaves_king_attacked(board: &Board, from: Square, to: Square) -> bool {
    let mover = match board.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    let mut probe = board.clone();
    if probe.move_piece(from, to, None).is_err() {
        return true;
    }
    match probe.find_king(mover.color) {
        Some(king_square) => attacked_by(&probe, king_square, mover.color.opposite()),
        None => false,
    }
}
