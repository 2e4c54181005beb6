//! Destination filtering and check detection for the interactive move path.

use super::attacks::piece_targets;
use super::special::{castling_targets, en_passant_target};
use crate::{Board, CastlingRights};
use chess_core::{Color, Move, MoveFlag, Piece, Square};

/// Returns the moves the piece on `from` may select, with their flags.
///
/// Combines the piece's movement rule with en passant (pawns) and castling
/// (kings), then drops destinations holding a piece of the mover's color.
/// Whether the move would expose the mover's king is not checked here; see
/// [`would_leave_own_king_in_check`].
pub fn candidate_moves(
    board: &Board,
    from: Square,
    castling: CastlingRights,
    last_move: Option<Move>,
) -> Vec<Move> {
    let Some((piece, color)) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut moves: Vec<Move> = piece_targets(piece, from, board)
        .into_iter()
        .filter(|&to| board.color_at(to) != Some(color))
        .map(|to| Move::new(from, to, piece, color, quiet_flag(piece, color, from, to)))
        .collect();

    match piece {
        Piece::Pawn => {
            if let Some(to) = en_passant_target(from, board, last_move) {
                moves.push(Move::new(from, to, piece, color, MoveFlag::EnPassant));
            }
        }
        Piece::King => {
            for (to, flag) in castling_targets(from, board, castling) {
                moves.push(Move::new(from, to, piece, color, flag));
            }
        }
        _ => {}
    }

    moves
}

/// Returns the destinations the piece on `from` may select.
pub fn moves_from(
    board: &Board,
    from: Square,
    castling: CastlingRights,
    last_move: Option<Move>,
) -> Vec<Square> {
    candidate_moves(board, from, castling, last_move)
        .into_iter()
        .map(|m| m.to)
        .collect()
}

/// Returns the flag of an ordinary move by `piece` from `from` to `to`.
pub(crate) fn quiet_flag(piece: Piece, color: Color, from: Square, to: Square) -> MoveFlag {
    if piece != Piece::Pawn {
        MoveFlag::Normal
    } else if to.row() == color.promotion_row() {
        MoveFlag::Promotion
    } else if from.row().abs_diff(to.row()) == 2 {
        MoveFlag::DoublePush
    } else {
        MoveFlag::Normal
    }
}

/// Returns true if any piece of color `by` could move onto `target`.
///
/// Uses the plain movement rules; castling and en passant never capture on
/// an occupied square, so they cannot attack.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces()
        .filter(|&(_, _, color)| color == by)
        .any(|(from, piece, _)| piece_targets(piece, from, board).contains(&target))
}

/// Returns true if the king of `color` is attacked. A missing king is never
/// in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// The self-check guard: call it on the board *after* a candidate move by
/// `color`. A true result means the move must be rejected.
pub fn would_leave_own_king_in_check(candidate: &Board, color: Color) -> bool {
    is_king_in_check(candidate, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_move;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    #[test]
    fn knight_from_start_excludes_own_pawn() {
        let board = Board::startpos();
        assert_eq!(
            moves_from(&board, sq(7, 6), CastlingRights::ALL, None),
            vec![sq(5, 5), sq(5, 7)]
        );
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::startpos();
        assert!(moves_from(&board, sq(4, 4), CastlingRights::ALL, None).is_empty());
    }

    #[test]
    fn blocked_pieces_have_no_moves_at_start() {
        let board = Board::startpos();
        for col in [0, 2, 3, 4, 5, 7] {
            assert!(
                moves_from(&board, sq(7, col), CastlingRights::ALL, None).is_empty(),
                "column {} should be blocked",
                col
            );
        }
    }

    #[test]
    fn slider_keeps_enemy_blocker_drops_own() {
        // White rook a4, black pawn a6, white pawn c4.
        let board = Board::from_fen("4k3/8/p7/8/R1P5/8/8/4K3").unwrap();
        let dests = moves_from(&board, sq(4, 0), CastlingRights::NONE, None);
        assert_eq!(
            dests,
            vec![sq(3, 0), sq(2, 0), sq(5, 0), sq(6, 0), sq(7, 0), sq(4, 1)]
        );
    }

    #[test]
    fn king_moves_include_castling() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let moves = candidate_moves(&board, sq(7, 4), CastlingRights::ALL, None);
        assert!(moves
            .iter()
            .any(|m| m.to == sq(7, 6) && m.flag == MoveFlag::CastleKingside));
        assert!(moves
            .iter()
            .any(|m| m.to == sq(7, 2) && m.flag == MoveFlag::CastleQueenside));
        assert!(!candidate_moves(&board, sq(7, 4), CastlingRights::NONE, None)
            .iter()
            .any(|m| m.flag.is_castling()));
    }

    #[test]
    fn pawn_moves_include_en_passant() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        let last = Move::new(sq(1, 3), sq(3, 3), Piece::Pawn, Color::Black, MoveFlag::DoublePush);
        let moves = candidate_moves(&board, sq(3, 4), CastlingRights::NONE, Some(last));
        assert_eq!(
            moves.iter().map(|m| (m.to, m.flag)).collect::<Vec<_>>(),
            vec![(sq(2, 4), MoveFlag::Normal), (sq(2, 3), MoveFlag::EnPassant)]
        );
    }

    #[test]
    fn flags_for_pawn_pushes_and_promotion() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/4P3/4K3").unwrap();
        let pushes = candidate_moves(&board, sq(6, 4), CastlingRights::NONE, None);
        assert_eq!(pushes[0].flag, MoveFlag::Normal);
        assert_eq!(pushes[1].flag, MoveFlag::DoublePush);
        let promo = candidate_moves(&board, sq(1, 0), CastlingRights::NONE, None);
        assert_eq!(promo[0].flag, MoveFlag::Promotion);
    }

    #[test]
    fn no_check_at_start() {
        let board = Board::startpos();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn check_detected_for_both_colors() {
        // White rook on e-file gives check to black king.
        let board = Board::from_fen("4k3/8/8/8/4R3/8/8/K7").unwrap();
        assert!(is_king_in_check(&board, Color::Black));
        assert!(!is_king_in_check(&board, Color::White));

        // Black knight checks the white king.
        let board = Board::from_fen("4k3/8/8/8/8/5n2/8/4K3").unwrap();
        assert!(is_king_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        // Black pawn d2 attacks e1; a pawn directly in front does not attack.
        let board = Board::from_fen("4k3/8/8/8/8/8/3p4/4K3").unwrap();
        assert!(is_king_in_check(&board, Color::White));
        let board = Board::from_fen("4k3/8/8/8/8/8/4p3/4K3").unwrap();
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn blocked_slider_gives_no_check() {
        let board = Board::from_fen("4k3/8/8/8/4R3/8/4P3/4K3").unwrap();
        let board = apply_move(
            &board,
            Move::normal(sq(4, 4), sq(4, 0), Piece::Rook, Color::White),
        );
        assert!(!is_king_in_check(&board, Color::Black));
        let board = Board::from_fen("4k3/4p3/8/8/4R3/8/8/K7").unwrap();
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let board = Board::from_fen("8/8/8/8/4R3/8/8/8").unwrap();
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn guard_rejects_pinned_piece_move() {
        // White bishop e2 pinned by black rook e8 against king e1.
        let board = Board::from_fen("4r2k/8/8/8/8/8/4B3/4K3").unwrap();
        let after = apply_move(
            &board,
            Move::normal(sq(6, 4), sq(5, 3), Piece::Bishop, Color::White),
        );
        assert!(would_leave_own_king_in_check(&after, Color::White));

        let king_step = apply_move(
            &board,
            Move::normal(sq(7, 4), sq(7, 3), Piece::King, Color::White),
        );
        assert!(!would_leave_own_king_in_check(&king_step, Color::White));
    }
}
