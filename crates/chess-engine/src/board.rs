//! Board state and castling rights.

use chess_core::{Color, FenError, FenParser, Move, Piece, Placement, Square};
use std::fmt;

/// Records which castling pieces have moved.
///
/// Six independent flags: each king and each corner rook. Flags only ever go
/// from unmoved to moved. The value is replaced wholesale after every move
/// via [`CastlingRights::after_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    /// Rook that starts on column 0.
    pub white_queen_rook_moved: bool,
    /// Rook that starts on column 7.
    pub white_king_rook_moved: bool,
    pub black_king_moved: bool,
    pub black_queen_rook_moved: bool,
    pub black_king_rook_moved: bool,
}

impl CastlingRights {
    /// Nothing has moved yet.
    pub const ALL: CastlingRights = CastlingRights {
        white_king_moved: false,
        white_queen_rook_moved: false,
        white_king_rook_moved: false,
        black_king_moved: false,
        black_queen_rook_moved: false,
        black_king_rook_moved: false,
    };

    /// Every castling piece counts as moved.
    pub const NONE: CastlingRights = CastlingRights {
        white_king_moved: true,
        white_queen_rook_moved: true,
        white_king_rook_moved: true,
        black_king_moved: true,
        black_queen_rook_moved: true,
        black_king_rook_moved: true,
    };

    /// Builds rights from a FEN castling field such as `"KQkq"`.
    ///
    /// A missing letter marks the matching rook as moved; a king with no
    /// letters at all is marked as moved.
    pub fn from_fen_field(field: &str) -> Self {
        let white_king_rook_moved = !field.contains('K');
        let white_queen_rook_moved = !field.contains('Q');
        let black_king_rook_moved = !field.contains('k');
        let black_queen_rook_moved = !field.contains('q');
        CastlingRights {
            white_king_moved: white_king_rook_moved && white_queen_rook_moved,
            white_queen_rook_moved,
            white_king_rook_moved,
            black_king_moved: black_king_rook_moved && black_queen_rook_moved,
            black_queen_rook_moved,
            black_king_rook_moved,
        }
    }

    /// Returns true if the king of `color` has moved.
    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    /// Returns true if the column-7 rook of `color` has moved.
    #[inline]
    pub const fn kingside_rook_moved(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_rook_moved,
            Color::Black => self.black_king_rook_moved,
        }
    }

    /// Returns true if the column-0 rook of `color` has moved.
    #[inline]
    pub const fn queenside_rook_moved(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_rook_moved,
            Color::Black => self.black_queen_rook_moved,
        }
    }

    /// Returns the rights after `m` has been played.
    ///
    /// A king move marks the king; a move from or onto a rook home square
    /// marks that rook, whether it moved or was captured there.
    pub fn after_move(self, m: Move) -> Self {
        let mut next = self;
        if m.piece == Piece::King {
            match m.color {
                Color::White => next.white_king_moved = true,
                Color::Black => next.black_king_moved = true,
            }
            if m.flag.is_castling() {
                next.mark_rook_home(m.from.row(), if m.to.col() == 6 { 7 } else { 0 });
            }
        }
        next.mark_rook_home(m.from.row(), m.from.col());
        next.mark_rook_home(m.to.row(), m.to.col());
        next
    }

    fn mark_rook_home(&mut self, row: u8, col: u8) {
        match (row, col) {
            (7, 0) => self.white_queen_rook_moved = true,
            (7, 7) => self.white_king_rook_moved = true,
            (0, 0) => self.black_queen_rook_moved = true,
            (0, 7) => self.black_king_rook_moved = true,
            _ => {}
        }
    }
}

/// An 8x8 grid of pieces.
///
/// Boards are values. Move application returns a new board
/// ([`apply_move`](crate::apply_move)); the in-place setters are private to
/// the crate.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: Placement,
}

impl Board {
    const BACK_RANK: [Piece; 8] = [
        Piece::Rook,
        Piece::Knight,
        Piece::Bishop,
        Piece::Queen,
        Piece::King,
        Piece::Bishop,
        Piece::Knight,
        Piece::Rook,
    ];

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    ///
    /// Black occupies rows 0-1 and White rows 6-7.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for (col, piece) in Self::BACK_RANK.iter().enumerate() {
            board.squares[Color::Black.back_row() as usize][col] = Some((*piece, Color::Black));
            board.squares[Color::Black.pawn_row() as usize][col] = Some((Piece::Pawn, Color::Black));
            board.squares[Color::White.pawn_row() as usize][col] = Some((Piece::Pawn, Color::White));
            board.squares[Color::White.back_row() as usize][col] = Some((*piece, Color::White));
        }
        board
    }

    /// Creates a board from a FEN string (only piece placement is used).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Board {
            squares: parsed.placement,
        })
    }

    pub(crate) fn from_placement(squares: Placement) -> Self {
        Board { squares }
    }

    /// Returns the FEN piece-placement field for this board.
    pub fn to_fen(&self) -> String {
        FenParser::placement_to_string(&self.squares)
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// Returns the color of the piece at the given square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<(Piece, Color)>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Iterates over occupied squares in row-major scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Returns the square of the first king of `color` in scan order.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(sq, _, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for square in squares {
                match square {
                    Some((piece, color)) => write!(f, " {}", piece.glyph(*color))?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveFlag;

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(board.piece_at(Square::at(7, 4)), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::at(0, 4)), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(Square::at(7, 3)), Some((Piece::Queen, Color::White)));
        assert_eq!(board.piece_at(Square::at(0, 0)), Some((Piece::Rook, Color::Black)));
        assert_eq!(board.piece_at(Square::at(6, 5)), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.piece_at(Square::at(1, 2)), Some((Piece::Pawn, Color::Black)));
        assert!(board.is_empty(Square::at(4, 4)));
    }

    #[test]
    fn startpos_has_sixteen_pieces_per_side() {
        let board = Board::startpos();
        let white = board.pieces().filter(|(_, _, c)| *c == Color::White).count();
        let black = board.pieces().filter(|(_, _, c)| *c == Color::Black).count();
        assert_eq!(white, 16);
        assert_eq!(black, 16);
    }

    #[test]
    fn startpos_matches_fen() {
        let from_fen = Board::from_fen(FenParser::STARTPOS).unwrap();
        assert_eq!(Board::startpos(), from_fen);
        assert_eq!(
            Board::startpos().to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn king_square() {
        let board = Board::startpos();
        assert_eq!(board.king_square(Color::White), Some(Square::at(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(Square::at(0, 4)));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn display_shows_glyphs() {
        let text = Board::startpos().to_string();
        assert!(text.starts_with("8  ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
        assert!(text.ends_with("a b c d e f g h"));
    }

    #[test]
    fn castling_rights_from_fen_field() {
        assert_eq!(CastlingRights::from_fen_field("KQkq"), CastlingRights::ALL);
        assert_eq!(CastlingRights::from_fen_field(""), CastlingRights::NONE);

        let rights = CastlingRights::from_fen_field("Kq");
        assert!(!rights.king_moved(Color::White));
        assert!(!rights.kingside_rook_moved(Color::White));
        assert!(rights.queenside_rook_moved(Color::White));
        assert!(rights.kingside_rook_moved(Color::Black));
        assert!(!rights.queenside_rook_moved(Color::Black));
    }

    #[test]
    fn king_move_marks_king() {
        let m = Move::normal(Square::at(7, 4), Square::at(7, 5), Piece::King, Color::White);
        let rights = CastlingRights::ALL.after_move(m);
        assert!(rights.king_moved(Color::White));
        assert!(!rights.kingside_rook_moved(Color::White));
        assert!(!rights.king_moved(Color::Black));
    }

    #[test]
    fn castle_marks_king_and_rook() {
        let m = Move::new(
            Square::at(0, 4),
            Square::at(0, 2),
            Piece::King,
            Color::Black,
            MoveFlag::CastleQueenside,
        );
        let rights = CastlingRights::ALL.after_move(m);
        assert!(rights.king_moved(Color::Black));
        assert!(rights.queenside_rook_moved(Color::Black));
        assert!(!rights.kingside_rook_moved(Color::Black));
    }

    #[test]
    fn rook_move_and_capture_mark_rooks() {
        let rook_move = Move::normal(Square::at(7, 7), Square::at(5, 7), Piece::Rook, Color::White);
        let rights = CastlingRights::ALL.after_move(rook_move);
        assert!(rights.kingside_rook_moved(Color::White));
        assert!(!rights.queenside_rook_moved(Color::White));

        let capture = Move::normal(Square::at(2, 2), Square::at(0, 0), Piece::Bishop, Color::White);
        let rights = rights.after_move(capture);
        assert!(rights.queenside_rook_moved(Color::Black));
        assert!(rights.kingside_rook_moved(Color::White));
    }
}
