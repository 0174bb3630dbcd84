//! [10x12 Mailbox] addressing. The playable 8x8 board is inset into a 10x12
//! grid whose border cells are sentinels, so moving a piece by a fixed offset
//! (file: ±1, rank: ±10, diagonals: ±9/±11, knight: ±8/±12/±19/±21) either
//! lands on a playable square or on a sentinel. Detecting that a move fell off
//! the board is then a single table lookup instead of re-deriving the row and
//! the column on every step. The two-cell border at the top and the bottom
//! makes knight jumps from the edge ranks land on sentinels, too.
//!
//! ```text
//! -1 -1 -1 -1 -1 -1 -1 -1 -1 -1
//! -1 -1 -1 -1 -1 -1 -1 -1 -1 -1
//! -1  0  1  2  3  4  5  6  7 -1
//! -1  8  9 10 11 12 13 14 15 -1
//! ..
//! -1 56 57 58 59 60 61 62 63 -1
//! -1 -1 -1 -1 -1 -1 -1 -1 -1 -1
//! -1 -1 -1 -1 -1 -1 -1 -1 -1 -1
//! ```
//!
//! [10x12 Mailbox]: https://www.chessprogramming.org/10x12_Board

use crate::chess::core::{Square, BOARD_SIZE, BOARD_WIDTH};

/// Number of columns of the padded grid.
pub const MAILBOX_WIDTH: u8 = 10;
/// Number of cells of the padded grid.
pub const MAILBOX_SIZE: u8 = MAILBOX_WIDTH * 12;

const SENTINEL: i8 = -1;
/// Offboard index of the first playable square (A8).
const FIRST_PLAYABLE: u8 = 2 * MAILBOX_WIDTH + 1;

/// The pair of lookup tables translating between the dense square index and
/// the padded grid.
#[derive(Debug, PartialEq, Eq)]
pub struct Mailbox {
    to_offboard: [u8; BOARD_SIZE as usize],
    to_square: [i8; MAILBOX_SIZE as usize],
}

/// Tables shared by every board. They are pure functions of the index and are
/// evaluated at compile time.
pub static MAILBOX: Mailbox = Mailbox::new();

impl Mailbox {
    const fn new() -> Self {
        let mut to_offboard = [0; BOARD_SIZE as usize];
        let mut to_square = [SENTINEL; MAILBOX_SIZE as usize];
        let mut index: u8 = 0;
        while index < BOARD_SIZE {
            let offboard =
                FIRST_PLAYABLE + MAILBOX_WIDTH * (index / BOARD_WIDTH) + index % BOARD_WIDTH;
            to_offboard[index as usize] = offboard;
            to_square[offboard as usize] = index as i8;
            index += 1;
        }
        Self {
            to_offboard,
            to_square,
        }
    }

    /// Returns the padded grid index of the square.
    #[must_use]
    pub const fn offboard(&self, square: Square) -> u8 {
        self.to_offboard[square as usize]
    }

    /// Returns the playable square at the padded grid index or `None` for
    /// sentinel cells (and for indices outside of the grid).
    #[must_use]
    pub fn square_at(&self, offboard: u8) -> Option<Square> {
        self.to_square
            .get(usize::from(offboard))
            .and_then(|&index| u8::try_from(index).ok())
            .map(|index| Square::ALL[usize::from(index)])
    }

    /// Moves `offset` cells away from `square` on the padded grid and returns
    /// the square it lands on, or `None` if it falls off the board.
    #[must_use]
    pub fn step(&self, square: Square, offset: i8) -> Option<Square> {
        self.square_at(self.offboard(square).checked_add_signed(offset)?)
    }
}
