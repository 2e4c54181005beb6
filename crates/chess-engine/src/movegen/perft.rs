//! Node counts over the search generator.
//!
//! `perft(board, color, k)` is the number of positions the search reaches at
//! ply `k`, so an unpruned search to depth `d` visits the sum of the counts
//! for plies 1 through `d`. Castling and en passant are never generated and
//! moves that expose the king are kept, so the counts agree with published
//! tables only while neither matters (the starting position up to depth 3).

use super::{apply_move, generate_moves};
use crate::Board;
use chess_core::{Color, Move};

/// Number of move sequences of length `depth` with `color` moving first.
pub fn perft(board: &Board, color: Color, depth: u8) -> u64 {
    match depth {
        0 => 1,
        1 => generate_moves(board, color).len() as u64,
        _ => generate_moves(board, color)
            .as_slice()
            .iter()
            .map(|&m| perft(&apply_move(board, m), color.opposite(), depth - 1))
            .sum(),
    }
}

/// The count below each root move, in generation order.
pub fn perft_divide(board: &Board, color: Color, depth: u8) -> Vec<(Move, u64)> {
    let below = depth.saturating_sub(1);
    generate_moves(board, color)
        .as_slice()
        .iter()
        .map(|&m| (m, perft(&apply_move(board, m), color.opposite(), below)))
        .collect()
}
