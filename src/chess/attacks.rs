//! Attack detection by probe-shape substitution: a square is attacked by a
//! piece of some kind exactly when a piece of the same kind standing on that
//! square could capture it. Instead of scanning the board for attackers, the
//! detector generates the moves of hypothetical "probe" pieces from the
//! attacked square and looks at what they would capture.

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceFlags, PieceKind, Player, Square};
use crate::chess::error::Error;
use crate::chess::movegen::generate_for;
use crate::chess::movelist::MoveList;

/// Shapes probed from the attacked square, in the order they are tried.
pub const PROBES: [PieceKind; 5] = [
    PieceKind::King,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Pawn,
];

/// Returns true if `attacker` is caught by a probe of kind `probe`. Queens
/// move both like rooks and bishops.
fn matches_probe(probe: PieceKind, attacker: PieceKind) -> bool {
    attacker == probe
        || (attacker == PieceKind::Queen && matches!(probe, PieceKind::Rook | PieceKind::Bishop))
}

/// Checks whether any opponent's piece of `defender` attacks `square`. The
/// square does not have to be occupied: the question is answered for a
/// hypothetical piece of `defender` standing there.
///
/// The board is never modified.
///
/// ```
/// use mailbox_chess::chess::attacks::is_attacked;
/// use mailbox_chess::chess::board::Board;
/// use mailbox_chess::chess::core::{Player, Square};
///
/// let board = Board::starting();
/// // Both the pawns and the knight on g1 defend f3.
/// assert!(is_attacked(&board, Square::F3, Player::Black).unwrap());
/// assert!(!is_attacked(&board, Square::E4, Player::Black).unwrap());
/// ```
///
/// # Errors
///
/// Returns [`Error::Allocation`] if a probe list can not grow.
pub fn is_attacked(board: &Board, square: Square, defender: Player) -> Result<bool, Error> {
    let flags = match board.at(square) {
        Some(piece) if piece.owner == defender => piece.flags,
        _ => PieceFlags::empty(),
    };
    let mut moves = MoveList::new(square);
    for probe in PROBES {
        let probe_piece = Piece {
            owner: defender,
            kind: probe,
            flags,
        };
        generate_for(board, probe_piece, &mut moves)?;
        let caught = moves.iter().any(|&target| {
            matches!(
                board.at(target),
                Some(piece) if piece.owner != defender && matches_probe(probe, piece.kind)
            )
        });
        if caught {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns the square of `player`'s king, or `None` if it is not on the board.
#[must_use]
pub fn find_king(board: &Board, player: Player) -> Option<Square> {
    board
        .pieces(player)
        .find(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(square, _)| square)
}

/// Checks whether `player`'s king is attacked.
///
/// # Errors
///
/// Returns [`Error::Allocation`] if a probe list can not grow.
///
/// # Panics
///
/// If `player` has no king on the board.
pub fn is_in_check(board: &Board, player: Player) -> Result<bool, Error> {
    let Some(king) = find_king(board, player) else {
        panic!("{player:?} king is not on the board");
    };
    is_attacked(board, king, player)
}

/// Checks whether the king standing on `square` is attacked.
///
/// # Errors
///
/// Returns [`Error::Allocation`] if a probe list can not grow.
///
/// # Panics
///
/// If there is no king on `square`.
pub fn is_king_attacked_at(board: &Board, square: Square) -> Result<bool, Error> {
    match board.at(square) {
        Some(piece) if piece.kind == PieceKind::King => is_attacked(board, square, piece.owner),
        _ => panic!("there is no king on {square}"),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kings(white: Square, black: Square) -> Board {
        let mut board = Board::empty();
        board.put(white, Piece::new(Player::White, PieceKind::King));
        board.put(black, Piece::new(Player::Black, PieceKind::King));
        board
    }

    #[test]
    fn probe_matching() {
        assert!(matches_probe(PieceKind::Rook, PieceKind::Rook));
        assert!(matches_probe(PieceKind::Rook, PieceKind::Queen));
        assert!(matches_probe(PieceKind::Bishop, PieceKind::Queen));
        assert!(!matches_probe(PieceKind::Bishop, PieceKind::Rook));
        assert!(!matches_probe(PieceKind::Knight, PieceKind::Queen));
        assert!(!matches_probe(PieceKind::King, PieceKind::Queen));
        assert!(matches_probe(PieceKind::Pawn, PieceKind::Pawn));
    }

    #[test]
    fn starting_position() {
        let board = Board::starting();
        assert_eq!(find_king(&board, Player::White), Some(Square::E1));
        assert_eq!(find_king(&board, Player::Black), Some(Square::E8));
        assert!(!is_in_check(&board, Player::White).unwrap());
        assert!(!is_in_check(&board, Player::Black).unwrap());
    }

    #[test]
    fn board_is_not_modified() {
        let mut board = kings(Square::E1, Square::E8);
        board.put(Square::E5, Piece::new(Player::Black, PieceKind::Rook));
        let before = board.clone();
        assert!(is_in_check(&board, Player::White).unwrap());
        assert!(!is_in_check(&board, Player::Black).unwrap());
        assert_eq!(board, before);
    }

    #[test]
    fn pawn_attacks_forward_diagonals_only() {
        let mut board = kings(Square::E4, Square::A8);
        board.put(Square::E5, Piece::new(Player::Black, PieceKind::Pawn));
        assert!(!is_king_attacked_at(&board, Square::E4).unwrap());
        board.put(Square::D5, Piece::new(Player::Black, PieceKind::Pawn));
        assert!(is_king_attacked_at(&board, Square::E4).unwrap());

        let mut board = kings(Square::A1, Square::E5);
        board.put(Square::D4, Piece::new(Player::White, PieceKind::Pawn));
        assert!(is_king_attacked_at(&board, Square::E5).unwrap());
        let mut board = kings(Square::A1, Square::E5);
        board.put(Square::D6, Piece::new(Player::White, PieceKind::Pawn));
        assert!(!is_king_attacked_at(&board, Square::E5).unwrap());
    }

    #[test]
    #[should_panic(expected = "White king is not on the board")]
    fn missing_king() {
        let _ = is_in_check(&Board::empty(), Player::White);
    }

    #[test]
    #[should_panic(expected = "there is no king on e2")]
    fn not_a_king() {
        let _ = is_king_attacked_at(&Board::starting(), Square::E2);
    }
}
