//! Move generation and execution.
//!
//! - [`attacks`] holds the per-piece movement rules.
//! - [`special`] decides castling and en passant availability.
//! - [`legality`] filters destinations for the interactive path and detects
//!   check.
//! - [`generate_moves`] enumerates every move of one side for the search.
//! - [`apply_move`] plays a move on a copy of the board.

pub mod attacks;
pub mod legality;
pub mod perft;
pub mod special;

use crate::Board;
use chess_core::{Color, Move, MoveFlag, Piece, Square};

pub use attacks::{
    bishop_targets, king_targets, knight_targets, pawn_targets, piece_targets, queen_targets,
    rook_targets,
};
pub use legality::{
    candidate_moves, is_king_in_check, is_square_attacked, moves_from,
    would_leave_own_king_in_check,
};
pub use special::{castling_targets, en_passant_target};

/// The moves of one side, in generation order.
///
/// A board built from FEN may hold any number of pieces, so the list grows
/// as needed. The initial capacity covers ordinary positions.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    const CAPACITY: usize = 64;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every move of `color` for the search.
///
/// Squares are scanned row by row, left to right, and each piece contributes
/// its destinations in movement-rule order, minus squares held by its own
/// side. Castling and en passant are not generated, and moves that leave the
/// king attacked are kept.
pub fn generate_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece, _) in board.pieces().filter(|&(_, _, c)| c == color) {
        for to in piece_targets(piece, from, board) {
            if board.color_at(to) == Some(color) {
                continue;
            }
            let flag = legality::quiet_flag(piece, color, from, to);
            moves.push(Move::new(from, to, piece, color, flag));
        }
    }
    moves
}

/// Plays `m` on a copy of `board` and returns the copy.
///
/// Whatever stands on the destination is replaced. A pawn arriving on its
/// last row becomes a queen. En passant removes the passed pawn, and castling
/// brings the rook to the far side of the king. Castling is recognized by
/// its flag or by a king stepping two columns from its home square.
///
/// An empty origin square leaves the board unchanged.
pub fn apply_move(board: &Board, m: Move) -> Board {
    let mut next = board.clone();
    let Some((piece, color)) = board.piece_at(m.from) else {
        return next;
    };

    next.set(m.from, None);
    let placed = if piece == Piece::Pawn && m.to.row() == color.promotion_row() {
        Piece::Queen
    } else {
        piece
    };
    next.set(m.to, Some((placed, color)));

    if m.flag == MoveFlag::EnPassant {
        next.set(special::en_passant_victim(m), None);
    }

    if piece == Piece::King && m.from == Square::at(color.back_row(), 4) {
        let row = color.back_row();
        let rook_hop = match (m.flag, m.to.col()) {
            (MoveFlag::CastleKingside, _) | (_, 6) => Some((7, 5)),
            (MoveFlag::CastleQueenside, _) | (_, 2) => Some((0, 3)),
            _ => None,
        };
        if let Some((rook_from, rook_to)) = rook_hop {
            let rook_from = Square::at(row, rook_from);
            if let Some(rook) = next.piece_at(rook_from) {
                next.set(rook_from, None);
                next.set(Square::at(row, rook_to), Some(rook));
            }
        }
    }

    next
}
