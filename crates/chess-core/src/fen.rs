//! FEN (Forsyth-Edwards Notation) parsing.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 or 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}

/// Contents of a square grid, row 0 first.
pub type Placement = [[Option<(Piece, Color)>; 8]; 8];

/// Parsed FEN data.
///
/// A bare piece-placement field is accepted as shorthand for a position with
/// White to move, no castling and no en passant square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Pieces by square; the first FEN rank (rank 8) is row 0.
    pub placement: Placement,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability characters, a subset of "KQkq".
    pub castling: String,
    /// En passant target square, if any.
    pub en_passant: Option<Square>,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 1 && parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;
        if parts.len() == 1 {
            return Ok(FenParser {
                placement,
                active_color: Color::White,
                castling: String::new(),
                en_passant: None,
            });
        }

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        for counter in &parts[4..] {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidCounter(counter.to_string()))?;
        }

        Ok(FenParser {
            placement,
            active_color,
            castling,
            en_passant,
        })
    }

    fn parse_placement(field: &str) -> Result<Placement, FenError> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placement: Placement = [[None; 8]; 8];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if col < 8 {
                        placement[row][col] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
                if col > 8 {
                    break;
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe 8 squares",
                    8 - row
                )));
            }
        }

        Ok(placement)
    }

    fn parse_castling(field: &str) -> Result<String, FenError> {
        if field == "-" {
            return Ok(String::new());
        }
        if let Some(c) = field.chars().find(|c| !"KQkq".contains(*c)) {
            return Err(FenError::InvalidCastlingRights(format!(
                "invalid character '{}'",
                c
            )));
        }
        Ok(field.to_string())
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(field) {
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }

    /// Serializes a grid back into a FEN piece-placement field.
    pub fn placement_to_string(placement: &Placement) -> String {
        let mut out = String::new();
        for (row, squares) in placement.iter().enumerate() {
            let mut empty = 0;
            for square in squares {
                match square {
                    Some((piece, color)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char(*color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}
