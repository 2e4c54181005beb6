//! Game session management.
//!
//! [`Game`] owns everything that changes between moves: the board, castling
//! rights, the last move (for en passant), the side to move and the move
//! history. Human moves go through the self-check guard; engine replies come
//! straight from the search.

use crate::movegen::{apply_move, candidate_moves, is_king_in_check, would_leave_own_king_in_check};
use crate::search::{SearchLimits, SearchReport, Searcher};
use crate::{evaluate, Board, CastlingRights};
use chess_core::{Color, FenError, FenParser, Move, MoveFlag, Piece, Square};
use thiserror::Error;
use tracing::debug;

/// Error type for game operations.
///
/// A failed operation leaves the game unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("{square} holds a piece of the wrong side: {side} is to move")]
    NotYourTurn { square: Square, side: Color },

    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("move {from}{to} would leave the king in check")]
    KingInCheck { from: Square, to: Square },

    #[error("{0} has no moves")]
    NoLegalMoves(Color),

    #[error("invalid move text: {0:?}")]
    InvalidMove(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// A chess game between a human and the search, or any mix of the two.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    castling: CastlingRights,
    last_move: Option<Move>,
    side_to_move: Color,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::startpos(),
            castling: CastlingRights::ALL,
            last_move: None,
            side_to_move: Color::White,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// An en passant square in the FEN is turned into the double pawn push
    /// that produced it, so the capture is available on the first move.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_placement(parsed.placement);
        let side_to_move = parsed.active_color;
        let last_move = parsed
            .en_passant
            .and_then(|sq| Self::double_push_through(&board, sq, side_to_move.opposite()));

        Ok(Game {
            castling: CastlingRights::from_fen_field(&parsed.castling),
            board,
            last_move,
            side_to_move,
            history: Vec::new(),
        })
    }

    /// The double push by `mover` that skipped `passed`, if its pawn is there.
    fn double_push_through(board: &Board, passed: Square, mover: Color) -> Option<Move> {
        let to = passed.offset(mover.pawn_direction(), 0)?;
        let from = Square::new(mover.pawn_row(), passed.col())?;
        if board.piece_at(to) != Some((Piece::Pawn, mover)) {
            return None;
        }
        Some(Move::new(from, to, Piece::Pawn, mover, MoveFlag::DoublePush))
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns the moves played so far, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the material score of the current board.
    pub fn score(&self) -> i32 {
        evaluate(&self.board)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }

    /// Returns the destinations the piece on `from` may legally move to.
    ///
    /// Unlike [`crate::moves_from`], destinations that leave the mover's king
    /// attacked are left out. Any piece may be queried, whoever is to move.
    pub fn moves_from(&self, from: Square) -> Vec<Square> {
        self.guarded_moves(from).map(|m| m.to).collect()
    }

    fn guarded_moves(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        candidate_moves(&self.board, from, self.castling, self.last_move)
            .into_iter()
            .filter(move |m| {
                let next = apply_move(&self.board, *m);
                !would_leave_own_king_in_check(&next, m.color)
            })
    }

    /// Plays the side to move's piece from `from` to `to`.
    ///
    /// Returns the move as played, with its flag resolved (castling, en
    /// passant, promotion).
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<Move, GameError> {
        let (_, color) = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if color != self.side_to_move {
            return Err(GameError::NotYourTurn {
                square: from,
                side: self.side_to_move,
            });
        }

        let m = candidate_moves(&self.board, from, self.castling, self.last_move)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(GameError::IllegalMove { from, to })?;

        let next = apply_move(&self.board, m);
        if would_leave_own_king_in_check(&next, color) {
            debug!(mv = %m, "rejected: king left in check");
            return Err(GameError::KingInCheck { from, to });
        }

        self.commit(m, next);
        Ok(m)
    }

    /// Plays a move given in UCI notation, e.g. `"e2e4"` or `"e7e8q"`.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, GameError> {
        let text = uci.trim();
        let (from, to) =
            Move::parse_uci(text).ok_or_else(|| GameError::InvalidMove(text.to_string()))?;
        self.make_move(from, to)
    }

    /// Lets the search play for the side to move at `depth`.
    pub fn engine_move(&mut self, depth: u8) -> Result<Move, GameError> {
        let mover = self.side_to_move;
        let report = self.engine_move_with(SearchLimits::depth(depth))?;
        report.best_move.ok_or(GameError::NoLegalMoves(mover))
    }

    /// Lets the search play for the side to move under `limits`.
    ///
    /// The move is played as found. The self-check guard is not applied, so
    /// the search may leave its own king attacked.
    pub fn engine_move_with(&mut self, limits: SearchLimits) -> Result<SearchReport, GameError> {
        let mover = self.side_to_move;
        let report = Searcher::new(limits).search(&self.board, mover);
        let m = report.best_move.ok_or(GameError::NoLegalMoves(mover))?;
        let next = apply_move(&self.board, m);
        self.commit(m, next);
        Ok(report)
    }

    fn commit(&mut self, m: Move, next: Board) {
        self.board = next;
        self.castling = self.castling.after_move(m);
        self.last_move = Some(m);
        self.history.push(m);
        self.side_to_move = self.side_to_move.opposite();
        debug!(
            mv = %m,
            ply = self.history.len(),
            score = self.score(),
            "move played"
        );
    }
}
