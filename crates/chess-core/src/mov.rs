//! Move representation.

use crate::{Color, Piece, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double push from its starting row.
    DoublePush = 1,
    /// King-side castle, king lands on column 6.
    CastleKingside = 2,
    /// Queen-side castle, king lands on column 2.
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn reaching the last row; always promotes to a queen.
    Promotion = 5,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A chess move: where a piece goes and which piece it is.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, color: Color, flag: MoveFlag) -> Self {
        Move {
            from,
            to,
            piece,
            color,
            flag,
        }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square, piece: Piece, color: Color) -> Self {
        Self::new(from, to, piece, color, MoveFlag::Normal)
    }

    /// Returns true if this move is a pawn advancing two rows.
    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.piece, Piece::Pawn) && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = if self.flag == MoveFlag::Promotion {
            "q"
        } else {
            ""
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses the squares of a move in UCI notation.
    ///
    /// Only the coordinates are returned: the piece and flags depend on the
    /// position, so the engine resolves them. A promotion suffix is accepted
    /// only as `q`, since pawns always promote to a queen.
    pub fn parse_uci(s: &str) -> Option<(Square, Square)> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        if s.len() == 5 && !s[4..].eq_ignore_ascii_case("q") {
            return None;
        }
        Some((from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {} {})", self.color, self.piece, self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
