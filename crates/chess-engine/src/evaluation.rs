//! Material evaluation.

use crate::Board;
use chess_core::Piece;

/// Returns the material value of a piece kind.
#[inline]
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 3,
        Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 1000,
    }
}

/// Material balance of the board: White's pieces count positive, Black's
/// negative.
pub fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece, color)| color.sign() * piece_value(piece))
        .sum()
}
