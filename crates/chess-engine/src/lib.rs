//! Chess rules and move search on an 8x8 grid board.
//!
//! This crate provides:
//! - [`Board`] - piece placement as a plain value, plus [`CastlingRights`]
//! - Move rules, special moves, check detection and move execution
//!   ([`movegen`])
//! - [`evaluate`] - material score, White positive
//! - [`find_best_move`] / [`Searcher`] - minimax with alpha-beta pruning
//! - [`Game`] - a session that validates human moves and plays engine replies
//!
//! # Coordinates
//!
//! Squares are `(row, column)`. Row 0 is Black's back rank and row 7 is
//! White's, so White pawns move toward row 0.
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::{find_best_move, Game};
//!
//! let mut game = Game::new();
//! game.make_move_uci("e2e4").unwrap();
//! assert_eq!(game.score(), 0);
//!
//! let reply = find_best_move(game.board(), 3, Color::Black).unwrap();
//! assert_eq!(game.board().color_at(reply.from), Some(Color::Black));
//! ```

mod board;
mod evaluation;
mod game;
pub mod movegen;
pub mod search;

pub use board::{Board, CastlingRights};
pub use evaluation::{evaluate, piece_value};
pub use game::{Game, GameError};
pub use movegen::{
    apply_move, generate_moves, is_king_in_check, is_square_attacked, moves_from, piece_targets,
    would_leave_own_king_in_check, MoveList,
};
pub use search::{find_best_move, minimax, SearchLimits, SearchReport, Searcher};
