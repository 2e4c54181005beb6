//! Castling and en passant availability.
//!
//! Both depend on state outside the board: castling on [`CastlingRights`],
//! en passant on the move played immediately before.

use crate::{Board, CastlingRights};
use chess_core::{Color, Move, MoveFlag, Piece, Square};

/// Returns the castling destinations available to the king on `from`.
///
/// Castling requires the king on its home square, an unmoved king and rook,
/// and empty squares between them. The rights alone vouch for the rook, and
/// whether the king is in check or passes over an attacked square is not
/// examined.
pub fn castling_targets(from: Square, board: &Board, rights: CastlingRights) -> Vec<(Square, MoveFlag)> {
    let mut targets = Vec::with_capacity(2);
    let Some((Piece::King, color)) = board.piece_at(from) else {
        return targets;
    };
    let row = color.back_row();
    if from != Square::at(row, 4) || rights.king_moved(color) {
        return targets;
    }

    let clear = |cols: &[u8]| cols.iter().all(|&col| board.is_empty(Square::at(row, col)));

    if !rights.kingside_rook_moved(color) && clear(&[5, 6]) {
        targets.push((Square::at(row, 6), MoveFlag::CastleKingside));
    }
    if !rights.queenside_rook_moved(color) && clear(&[1, 2, 3]) {
        targets.push((Square::at(row, 2), MoveFlag::CastleQueenside));
    }
    targets
}

/// Returns the en passant destination for the pawn on `from`, if any.
///
/// Available when `last_move` was an enemy pawn's two-row advance that landed
/// beside this pawn. The destination is the square the enemy pawn skipped.
pub fn en_passant_target(from: Square, board: &Board, last_move: Option<Move>) -> Option<Square> {
    let (Piece::Pawn, color) = board.piece_at(from)? else {
        return None;
    };
    let last = last_move?;
    let them = color.opposite();

    let capture_row = (color.pawn_row() as i8 + 3 * color.pawn_direction()) as u8;
    if from.row() != capture_row {
        return None;
    }
    if !last.is_double_push()
        || last.color != them
        || last.from.row() != them.pawn_row()
        || last.to.row() != capture_row
        || last.from.col() != last.to.col()
        || last.to.col().abs_diff(from.col()) != 1
    {
        return None;
    }

    last.to.offset(color.pawn_direction(), 0)
}

/// Returns the square of the pawn removed by an en passant capture.
pub fn en_passant_victim(m: Move) -> Square {
    Square::at(m.from.row(), m.to.col())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    const CASTLE_READY: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R";

    #[test]
    fn both_castles_when_clear_and_unmoved() {
        let board = Board::from_fen(CASTLE_READY).unwrap();
        assert_eq!(
            castling_targets(sq(7, 4), &board, CastlingRights::ALL),
            vec![
                (sq(7, 6), MoveFlag::CastleKingside),
                (sq(7, 2), MoveFlag::CastleQueenside)
            ]
        );
        assert_eq!(
            castling_targets(sq(0, 4), &board, CastlingRights::ALL),
            vec![
                (sq(0, 6), MoveFlag::CastleKingside),
                (sq(0, 2), MoveFlag::CastleQueenside)
            ]
        );
    }

    #[test]
    fn no_castle_after_king_moved() {
        let board = Board::from_fen(CASTLE_READY).unwrap();
        let rights = CastlingRights {
            white_king_moved: true,
            ..CastlingRights::ALL
        };
        assert!(castling_targets(sq(7, 4), &board, rights).is_empty());
        assert_eq!(castling_targets(sq(0, 4), &board, rights).len(), 2);
    }

    #[test]
    fn no_castle_on_side_whose_rook_moved() {
        let board = Board::from_fen(CASTLE_READY).unwrap();
        let rights = CastlingRights {
            black_queen_rook_moved: true,
            ..CastlingRights::ALL
        };
        assert_eq!(
            castling_targets(sq(0, 4), &board, rights),
            vec![(sq(0, 6), MoveFlag::CastleKingside)]
        );
    }

    #[test]
    fn no_castle_through_pieces() {
        let board = Board::startpos();
        assert!(castling_targets(sq(7, 4), &board, CastlingRights::ALL).is_empty());

        // Only the b1 knight blocks the queen side.
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R").unwrap();
        assert_eq!(
            castling_targets(sq(7, 4), &board, CastlingRights::ALL),
            vec![(sq(7, 6), MoveFlag::CastleKingside)]
        );
    }

    #[test]
    fn castle_allowed_through_attacked_squares() {
        // Black rook on f-file attacks f1 and the white king is not shielded.
        let board = Board::from_fen("4k3/8/8/5r2/8/8/8/R3K2R").unwrap();
        let targets = castling_targets(sq(7, 4), &board, CastlingRights::ALL);
        assert!(targets.contains(&(sq(7, 6), MoveFlag::CastleKingside)));
    }

    #[test]
    fn castle_follows_rights_not_rook_presence() {
        // The a1 rook is gone but its flag was never cleared.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R").unwrap();
        assert_eq!(
            castling_targets(sq(7, 4), &board, CastlingRights::ALL),
            vec![
                (sq(7, 6), MoveFlag::CastleKingside),
                (sq(7, 2), MoveFlag::CastleQueenside)
            ]
        );
        let rights = CastlingRights {
            white_queen_rook_moved: true,
            ..CastlingRights::ALL
        };
        assert_eq!(
            castling_targets(sq(7, 4), &board, rights),
            vec![(sq(7, 6), MoveFlag::CastleKingside)]
        );
    }

    #[test]
    fn no_castle_for_non_king_or_displaced_king() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R4K1R").unwrap();
        assert!(castling_targets(sq(7, 5), &board, CastlingRights::ALL).is_empty());
        assert!(castling_targets(sq(7, 0), &board, CastlingRights::ALL).is_empty());
    }

    fn double_push(from: Square, to: Square, color: Color) -> Move {
        Move::new(from, to, Piece::Pawn, color, MoveFlag::DoublePush)
    }

    #[test]
    fn white_en_passant_after_black_double_push() {
        // White pawn e5, black pawn just moved d7-d5.
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        let last = double_push(sq(1, 3), sq(3, 3), Color::Black);
        assert_eq!(en_passant_target(sq(3, 4), &board, Some(last)), Some(sq(2, 3)));
    }

    #[test]
    fn black_en_passant_after_white_double_push() {
        // Black pawn d4, white pawn just moved e2-e4.
        let board = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3").unwrap();
        let last = double_push(sq(6, 4), sq(4, 4), Color::White);
        assert_eq!(en_passant_target(sq(4, 3), &board, Some(last)), Some(sq(5, 4)));
    }

    #[test]
    fn no_en_passant_without_fresh_double_push() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        assert_eq!(en_passant_target(sq(3, 4), &board, None), None);

        let single = Move::normal(sq(2, 3), sq(3, 3), Piece::Pawn, Color::Black);
        assert_eq!(en_passant_target(sq(3, 4), &board, Some(single)), None);

        let other_piece = Move::normal(sq(0, 4), sq(0, 5), Piece::King, Color::Black);
        assert_eq!(en_passant_target(sq(3, 4), &board, Some(other_piece)), None);
    }

    #[test]
    fn no_en_passant_when_not_adjacent_or_wrong_row() {
        let board = Board::from_fen("4k3/8/8/p3P3/8/8/8/4K3").unwrap();
        let far = double_push(sq(1, 0), sq(3, 0), Color::Black);
        assert_eq!(en_passant_target(sq(3, 4), &board, Some(far)), None);

        // White pawn on e4 is one row short of the capture row.
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let last = double_push(sq(1, 3), sq(3, 3), Color::Black);
        assert_eq!(en_passant_target(sq(4, 4), &board, Some(last)), None);
        assert_eq!(en_passant_target(sq(2, 3), &board, Some(last)), None);
    }

    #[test]
    fn victim_is_beside_the_capturer() {
        let m = Move::new(sq(3, 4), sq(2, 3), Piece::Pawn, Color::White, MoveFlag::EnPassant);
        assert_eq!(en_passant_victim(m), sq(3, 3));
        let m = Move::new(sq(4, 3), sq(5, 4), Piece::Pawn, Color::Black, MoveFlag::EnPassant);
        assert_eq!(en_passant_victim(m), sq(4, 4));
    }
}
