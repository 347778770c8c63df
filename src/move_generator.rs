use crate::board::Board;
use crate::piece::{Color, Piece, PieceType};
use crate::square::{file_of, rank_of, square_at, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const CARDINAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Candidate destinations for the piece on `origin`, following its movement
/// and capture geometry but ignoring whether the mover's own king ends up
/// attacked. An empty square yields an empty list.
pub fn valid_moves(board: &Board, origin: Square) -> Vec<Square> {
    let piece = match board.piece_at(origin) {
        Some(p) => p,
        None => return Vec::new(),
    };
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, &piece),
        PieceType::Knight => knight_moves(&piece),
        PieceType::Bishop => ray_moves(board, &piece, &DIAGONAL_DIRECTIONS),
        PieceType::Rook => ray_moves(board, &piece, &CARDINAL_DIRECTIONS),
        PieceType::Queen => {
            let mut moves = ray_moves(board, &piece, &CARDINAL_DIRECTIONS);
            moves.extend(ray_moves(board, &piece, &DIAGONAL_DIRECTIONS));
            moves
        }
        PieceType::King => king_moves(board, &piece),
    }
}

/// [`valid_moves`] minus destinations occupied by a same-color piece.
pub fn pseudo_legal_moves(board: &Board, origin: Square) -> Vec<Square> {
    let piece = match board.piece_at(origin) {
        Some(p) => p,
        None => return Vec::new(),
    };
    valid_moves(board, origin)
        .into_iter()
        .filter(|&sq| board.piece_at(sq).map_or(true, |t| t.color != piece.color))
        .collect()
}

fn pawn_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    let (rank, file) = (rank_of(piece.square) as i8, file_of(piece.square) as i8);
    let direction: i8 = if piece.color == Color::White { 1 } else { -1 };

    if let Some(forward) = square_at(rank + direction, file) {
        if board.piece_at(forward).is_none() {
            moves.push(forward);
            // Double step only while the single-step square is also empty
            if !piece.has_moved {
                if let Some(double) = square_at(rank + 2 * direction, file) {
                    if board.piece_at(double).is_none() {
                        moves.push(double);
                    }
                }
            }
        }
    }

    for file_offset in [-1, 1] {
        if let Some(capture) = square_at(rank + direction, file + file_offset) {
            if let Some(target) = board.piece_at(capture) {
                if target.color != piece.color {
                    moves.push(capture);
                }
            }
        }
    }

    moves
}

fn knight_moves(piece: &Piece) -> Vec<Square> {
    let (rank, file) = (rank_of(piece.square) as i8, file_of(piece.square) as i8);
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, df)| square_at(rank + dr, file + df))
        .collect()
}

fn ray_moves(board: &Board, piece: &Piece, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, df) in directions {
        let (mut rank, mut file) = (rank_of(piece.square) as i8, file_of(piece.square) as i8);
        loop {
            rank += dr;
            file += df;
            let sq = match square_at(rank, file) {
                Some(sq) => sq,
                None => break,
            };
            match board.piece_at(sq) {
                None => moves.push(sq),
                Some(blocker) => {
                    if blocker.color != piece.color {
                        moves.push(sq);
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn king_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    let (rank, file) = (rank_of(piece.square) as i8, file_of(piece.square) as i8);

    for &(dr, df) in CARDINAL_DIRECTIONS.iter().chain(&DIAGONAL_DIRECTIONS) {
        if let Some(sq) = square_at(rank + dr, file + df) {
            if board.piece_at(sq).map_or(true, |t| t.color != piece.color) {
                moves.push(sq);
            }
        }
    }

    if !piece.has_moved {
        let back_rank = rank_of(piece.square);
        if can_castle(board, piece, back_rank * 8 + 7, &[5, 6]) {
            moves.push(back_rank * 8 + 6);
        }
        if can_castle(board, piece, back_rank * 8, &[1, 2, 3]) {
            moves.push(back_rank * 8 + 2);
        }
    }

    moves
}

// Castling eligibility: unmoved rook on its home square and an empty path
// between it and the king. Whether the king's start, transit or destination
// square is attacked is not checked here.
fn can_castle(board: &Board, king: &Piece, rook_square: Square, between_files: &[usize]) -> bool {
    let rook = match board.piece_at(rook_square) {
        Some(r) => r,
        None => return false,
    };
    if rook.piece_type != PieceType::Rook || rook.color != king.color || rook.has_moved {
        return false;
    }
    let rank = rank_of(king.square);
    between_files
        .iter()
        .all(|&f| board.piece_at(rank * 8 + f).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::parse_square;

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort_unstable();
        v
    }

    fn squares(names: &[&str]) -> Vec<Square> {
        sorted(names.iter().map(|s| sq(s)).collect())
    }

    fn lone_piece(piece_type: PieceType, color: Color, at: &str) -> (Board, Square) {
        let mut board = Board::empty();
        let origin = sq(at);
        board.place_piece(Piece::new(piece_type, color, origin), origin);
        (board, origin)
    }

    #[test]
    fn knight_on_b1_reaches_three_squares() {
        let (board, origin) = lone_piece(PieceType::Knight, Color::White, "b1");
        assert_eq!(
            sorted(valid_moves(&board, origin)),
            squares(&["a3", "c3", "d2"])
        );
    }

    #[test]
    fn knight_on_d4_reaches_eight_squares() {
        let (board, origin) = lone_piece(PieceType::Knight, Color::White, "d4");
        assert_eq!(
            sorted(valid_moves(&board, origin)),
            squares(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
        );
    }

    #[test]
    fn knight_ignores_friendly_squares_only_in_pseudo_legal_moves() {
        let (mut board, origin) = lone_piece(PieceType::Knight, Color::White, "d4");
        board.place_piece(Piece::new(PieceType::Pawn, Color::White, sq("b3")), sq("b3"));
        board.place_piece(Piece::new(PieceType::Pawn, Color::Black, sq("f5")), sq("f5"));

        let pseudo = pseudo_legal_moves(&board, origin);
        assert!(!pseudo.contains(&sq("b3")));
        assert!(pseudo.contains(&sq("f5")));
        assert!(valid_moves(&board, origin).contains(&sq("b3")));
    }

    #[test]
    fn unmoved_pawn_may_step_once_or_twice() {
        let board = Board::standard();
        assert_eq!(
            sorted(pseudo_legal_moves(&board, sq("e2"))),
            squares(&["e3", "e4"])
        );
        assert_eq!(
            sorted(pseudo_legal_moves(&board, sq("d7"))),
            squares(&["d5", "d6"])
        );
    }

    #[test]
    fn moved_pawn_loses_the_double_step() {
        let (mut board, origin) = lone_piece(PieceType::Pawn, Color::White, "e2");
        let mut pawn = board.piece_at(origin).unwrap();
        pawn.has_moved = true;
        board.place_piece(pawn, origin);
        assert_eq!(sorted(valid_moves(&board, origin)), squares(&["e3"]));
    }

    #[test]
    fn blocked_pawn_has_no_forward_moves() {
        let board =
            Board::from_position_string("4k3/8/8/8/4p3/4P3/8/4K3").unwrap();
        assert!(valid_moves(&board, sq("e3")).is_empty());
    }

    #[test]
    fn pawn_captures_only_diagonally_onto_enemies() {
        let board =
            Board::from_position_string("4k3/8/8/3p1p2/4P3/8/8/4K3").unwrap();
        // e6 shows up as well: pieces decoded from a position string carry
        // fresh has-moved flags, so the double step is still on offer
        assert_eq!(
            sorted(valid_moves(&board, sq("e4"))),
            squares(&["d5", "e5", "e6", "f5"])
        );
        // Black pawn captures toward rank 1
        assert!(valid_moves(&board, sq("d5")).contains(&sq("e4")));
    }

    #[test]
    fn rook_rays_stop_at_the_first_blocker() {
        let board =
            Board::from_position_string("4k3/8/8/8/1p2R1P1/8/8/4K3").unwrap();
        let moves = sorted(valid_moves(&board, sq("e4")));
        assert!(moves.contains(&sq("b4"))); // enemy blocker included
        assert!(!moves.contains(&sq("a4"))); // nothing beyond it
        assert!(!moves.contains(&sq("g4"))); // friendly blocker excluded
        assert!(moves.contains(&sq("f4")));
        assert!(moves.contains(&sq("e8"))); // enemy king is a blocker like any other
    }

    #[test]
    fn bishop_walks_diagonals_only() {
        let (board, origin) = lone_piece(PieceType::Bishop, Color::White, "c1");
        let moves = sorted(valid_moves(&board, origin));
        assert_eq!(
            moves,
            squares(&["a3", "b2", "d2", "e3", "f4", "g5", "h6"])
        );
    }

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        let (board, origin) = lone_piece(PieceType::Queen, Color::White, "d4");
        assert_eq!(valid_moves(&board, origin).len(), 27);
    }

    #[test]
    fn king_reaches_adjacent_squares() {
        let (board, origin) = lone_piece(PieceType::King, Color::White, "d4");
        assert_eq!(
            sorted(valid_moves(&board, origin)),
            squares(&["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"])
        );
    }

    #[test]
    fn castling_destinations_appear_when_path_is_clear() {
        let board = Board::from_position_string("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let white = valid_moves(&board, sq("e1"));
        assert!(white.contains(&sq("g1")));
        assert!(white.contains(&sq("c1")));
        let black = valid_moves(&board, sq("e8"));
        assert!(black.contains(&sq("g8")));
        assert!(black.contains(&sq("c8")));
    }

    #[test]
    fn castling_requires_an_empty_path_and_unmoved_rook() {
        let board = Board::from_position_string("rn2k2r/8/8/8/8/8/8/R3K1NR").unwrap();
        // Knight on g1 blocks white kingside; knight on b8 blocks black queenside
        assert!(!valid_moves(&board, sq("e1")).contains(&sq("g1")));
        assert!(valid_moves(&board, sq("e1")).contains(&sq("c1")));
        assert!(!valid_moves(&board, sq("e8")).contains(&sq("c8")));
        assert!(valid_moves(&board, sq("e8")).contains(&sq("g8")));

        let mut board = Board::from_position_string("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let mut rook = board.piece_at(sq("h1")).unwrap();
        rook.has_moved = true;
        board.place_piece(rook, sq("h1"));
        assert!(!valid_moves(&board, sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn no_piece_ever_targets_its_own_square() {
        let board = Board::standard();
        for color in [Color::White, Color::Black] {
            for piece in board.pieces_for(color) {
                assert!(!pseudo_legal_moves(&board, piece.square).contains(&piece.square));
            }
        }
    }
}
