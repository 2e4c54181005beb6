//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for row/column board coordinates
//! - [`Move`] for move representation
//! - FEN parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser, Placement};
pub use mov::{Move, MoveFlag};
pub use piece::Piece;
pub use square::Square;
