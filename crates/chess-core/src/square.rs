//! Board square representation.

use std::fmt;

/// A square on the chess board, addressed by row and column.
///
/// Row 0 is Black's back rank and row 7 is White's, so `(6, 4)` is e2 and
/// `(0, 4)` is e8. A `Square` is always on the board: the only ways to build
/// one are the checked constructors below.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, or `None` if either coordinate is outside 0-7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from coordinates known to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is outside 0-7.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square out of range");
        Square { row, col }
    }

    /// Returns the square displaced by `(d_row, d_col)`, or `None` off-board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Iterates over all 64 squares, row by row, left to right.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col) as char,
            (b'8' - self.row) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({},{})", self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
