//! Pseudo-legal move generation on the [10x12 Mailbox]: every destination
//! that is reachable according to the piece geometry and the occupancy of the
//! board, regardless of whether the move leaves the mover's king in check.
//!
//! All steps are made on the padded grid, so the sentinel border (and not the
//! row/column arithmetic) ends the scans at the edges of the board.
//!
//! [10x12 Mailbox]: https://www.chessprogramming.org/10x12_Board

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player};
use crate::chess::error::Error;
use crate::chess::movelist::MoveList;

#[allow(missing_docs)]
pub const ROOK_DIRECTIONS: [i8; 4] = [-10, -1, 1, 10];
#[allow(missing_docs)]
pub const BISHOP_DIRECTIONS: [i8; 4] = [-11, -9, 9, 11];
/// Queen slides along the union of rook and bishop directions, king steps
/// once in each of them.
pub const QUEEN_DIRECTIONS: [i8; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
#[allow(missing_docs)]
pub const KNIGHT_OFFSETS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];

/// Replaces the contents of `moves` with the pseudo-legal destinations of the
/// piece standing on its origin. An empty origin has no moves.
///
/// ```
/// use mailbox_chess::chess::board::Board;
/// use mailbox_chess::chess::core::Square;
/// use mailbox_chess::chess::movegen::generate_moves;
/// use mailbox_chess::chess::movelist::MoveList;
///
/// let board = Board::starting();
/// let mut moves = MoveList::new(Square::G1);
/// generate_moves(&board, &mut moves).unwrap();
/// assert_eq!(moves.as_slice(), &[Square::F3, Square::H3]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the list can not grow. Generation stops
/// and `moves` is left empty.
pub fn generate_moves(board: &Board, moves: &mut MoveList) -> Result<(), Error> {
    match board.at(moves.origin()) {
        Some(mover) => generate_for(board, mover, moves),
        None => {
            moves.clear();
            Ok(())
        },
    }
}

/// Generates the destinations of `mover` as if it was standing on the origin of
/// `moves`, whatever actually occupies that square. This makes it possible to
/// query hypothetical pieces without modifying the board.
pub(crate) fn generate_for(board: &Board, mover: Piece, moves: &mut MoveList) -> Result<(), Error> {
    moves.clear();
    match mover.kind {
        PieceKind::Rook => slide(board, mover.owner, &ROOK_DIRECTIONS, moves),
        PieceKind::Bishop => slide(board, mover.owner, &BISHOP_DIRECTIONS, moves),
        PieceKind::Queen => slide(board, mover.owner, &QUEEN_DIRECTIONS, moves),
        PieceKind::Knight => leap(board, mover.owner, &KNIGHT_OFFSETS, moves),
        PieceKind::King => leap(board, mover.owner, &QUEEN_DIRECTIONS, moves),
        PieceKind::Pawn => pawn(board, mover, moves),
    }
}

/// Follows each direction until the board edge or a piece: empty squares and
/// the first opponent's piece are reachable.
fn slide(
    board: &Board,
    player: Player,
    directions: &[i8],
    moves: &mut MoveList,
) -> Result<(), Error> {
    let mailbox = board.mailbox();
    for &direction in directions {
        let mut current = moves.origin();
        while let Some(target) = mailbox.step(current, direction) {
            match board.at(target) {
                None => moves.push(target)?,
                Some(piece) => {
                    if piece.owner != player {
                        moves.push(target)?;
                    }
                    break;
                },
            }
            current = target;
        }
    }
    Ok(())
}

/// Single step by each offset onto an empty or opponent-occupied square.
fn leap(board: &Board, player: Player, offsets: &[i8], moves: &mut MoveList) -> Result<(), Error> {
    let mailbox = board.mailbox();
    for &offset in offsets {
        let Some(target) = mailbox.step(moves.origin(), offset) else {
            continue;
        };
        if !matches!(board.at(target), Some(piece) if piece.owner == player) {
            moves.push(target)?;
        }
    }
    Ok(())
}

fn pawn(board: &Board, mover: Piece, moves: &mut MoveList) -> Result<(), Error> {
    let mailbox = board.mailbox();
    let origin = moves.origin();
    let push = mover.owner.push_offset();
    if let Some(single) = mailbox.step(origin, push) {
        if board.at(single).is_none() {
            moves.push(single)?;
            if !mover.has_moved() {
                if let Some(double) = mailbox.step(single, push) {
                    if board.at(double).is_none() {
                        moves.push(double)?;
                    }
                }
            }
        }
    }
    for capture in [push - 1, push + 1] {
        let Some(target) = mailbox.step(origin, capture) else {
            continue;
        };
        let reachable = match board.at(target) {
            Some(piece) => piece.owner != mover.owner,
            // En passant: the opponent's pawn has just passed the target.
            None => mailbox.step(target, -push).is_some_and(|passed| {
                matches!(
                    board.at(passed),
                    Some(piece) if piece.owner != mover.owner && piece.is_en_passant_eligible()
                )
            }),
        };
        if reachable {
            moves.push(target)?;
        }
    }
    Ok(())
}
