//! Chess piece representation.

use crate::Color;

/// The six kinds of chess pieces.
///
/// A piece on the board is a `(Piece, Color)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece kinds in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    const LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];
    const NAMES: [&'static str; 6] = ["Pawn", "Knight", "Bishop", "Rook", "Queen", "King"];

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn to_fen_char(self, color: Color) -> char {
        let letter = Self::LETTERS[self as usize];
        match color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    /// Reads a FEN letter back into a piece and its side.
    pub fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let lower = c.to_ascii_lowercase();
        let index = Self::LETTERS.iter().position(|&l| l == lower)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((Self::ALL[index], color))
    }

    /// Returns the board glyph for this piece with the given color.
    pub const fn glyph(self, color: Color) -> char {
        match (self, color) {
            (Piece::Pawn, Color::White) => '♙',
            (Piece::Knight, Color::White) => '♘',
            (Piece::Bishop, Color::White) => '♗',
            (Piece::Rook, Color::White) => '♖',
            (Piece::Queen, Color::White) => '♕',
            (Piece::King, Color::White) => '♔',
            (Piece::Pawn, Color::Black) => '♟',
            (Piece::Knight, Color::Black) => '♞',
            (Piece::Bishop, Color::Black) => '♝',
            (Piece::Rook, Color::Black) => '♜',
            (Piece::Queen, Color::Black) => '♛',
            (Piece::King, Color::Black) => '♚',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::NAMES[*self as usize])
    }
}
