//! Per-piece movement rules.
//!
//! Each function returns the pseudo-legal destinations of the piece on
//! `from`, in a fixed order. Turn and check are ignored, and destinations may
//! hold the mover's own pieces; filtering happens in
//! [`legality`](super::legality) and [`generate_moves`](super::generate_moves).

use crate::Board;
use chess_core::{Piece, Square};

/// Orthogonal directions, in scan order.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal directions, in scan order.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Queen and king directions: orthogonals first, then diagonals.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

/// Returns the pseudo-legal destinations of a pawn.
///
/// The pawn's color is read from the board; an empty `from` yields nothing.
pub fn pawn_targets(from: Square, board: &Board) -> Vec<Square> {
    let mut targets = Vec::with_capacity(4);
    let Some(color) = board.color_at(from) else {
        return targets;
    };
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            targets.push(one);
        }
    }

    if from.row() == color.pawn_row() {
        if let (Some(one), Some(two)) = (from.offset(dir, 0), from.offset(2 * dir, 0)) {
            if board.is_empty(one) && board.is_empty(two) {
                targets.push(two);
            }
        }
    }

    for side in [-1, 1] {
        if let Some(diag) = from.offset(dir, side) {
            if board.color_at(diag) == Some(color.opposite()) {
                targets.push(diag);
            }
        }
    }

    targets
}

/// Returns the squares a knight jumps to.
pub fn knight_targets(from: Square) -> Vec<Square> {
    leaper_targets(from, &KNIGHT_JUMPS)
}

/// Returns the squares adjacent to a king.
pub fn king_targets(from: Square) -> Vec<Square> {
    leaper_targets(from, &QUEEN_DIRECTIONS)
}

/// Returns rook destinations along the four orthogonals.
pub fn rook_targets(from: Square, board: &Board) -> Vec<Square> {
    sliding_targets(from, board, &ROOK_DIRECTIONS)
}

/// Returns bishop destinations along the four diagonals.
pub fn bishop_targets(from: Square, board: &Board) -> Vec<Square> {
    sliding_targets(from, board, &BISHOP_DIRECTIONS)
}

/// Returns queen destinations: rook directions, then bishop directions.
pub fn queen_targets(from: Square, board: &Board) -> Vec<Square> {
    sliding_targets(from, board, &QUEEN_DIRECTIONS)
}

/// Dispatches to the movement rule for `piece`.
pub fn piece_targets(piece: Piece, from: Square, board: &Board) -> Vec<Square> {
    match piece {
        Piece::Pawn => pawn_targets(from, board),
        Piece::Knight => knight_targets(from),
        Piece::Bishop => bishop_targets(from, board),
        Piece::Rook => rook_targets(from, board),
        Piece::Queen => queen_targets(from, board),
        Piece::King => king_targets(from),
    }
}

fn leaper_targets(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

/// Walks each direction, keeping empty squares and the first occupied one.
fn sliding_targets(from: Square, board: &Board, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut targets = Vec::with_capacity(14);
    for &(dr, dc) in directions {
        let mut current = from.offset(dr, dc);
        while let Some(sq) = current {
            targets.push(sq);
            if !board.is_empty(sq) {
                break;
            }
            current = sq.offset(dr, dc);
        }
    }
    targets
}
