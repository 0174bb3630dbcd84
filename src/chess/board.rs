//! Square-centric [`Board`]: one optional [`Piece`] per square, the
//! [`Mailbox`] tables used to walk the board and the pieces captured so far.

use std::fmt::{self, Write as _};
use std::io::Write;

use arrayvec::ArrayVec;

use crate::chess::attacks;
use crate::chess::core::{
    File,
    Piece,
    PieceFlags,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};
use crate::chess::error::Error;
use crate::chess::mailbox::{Mailbox, MAILBOX};
use crate::chess::movegen;
use crate::chess::movelist::MoveList;

/// Each player starts with 15 pieces that can be captured (everything except
/// the king).
pub const CAPTURE_CAPACITY: usize = 15;

type Captured = ArrayVec<Piece, CAPTURE_CAPACITY>;

/// Pieces on the squares of the back ranks, from file A to file H.
const BACK_RANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement and capture bookkeeping of a game.
///
/// The board does not know whose turn it is and does not check whether the
/// moves applied to it are legal: this is the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // (Possibly) occupied squares.
    grid: [Option<Piece>; BOARD_SIZE as usize],
    mailbox: &'static Mailbox,
    captured_white: Captured,
    captured_black: Captured,
}

impl Board {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use mailbox_chess::chess::board::Board;
    /// use mailbox_chess::chess::core::{PieceKind, Player, Square};
    ///
    /// let board = Board::starting();
    /// let king = board.at(Square::E1).unwrap();
    /// assert_eq!((king.owner, king.kind), (Player::White, PieceKind::King));
    /// assert!(board.at(Square::E4).is_none());
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        board.place_starting_pieces();
        board
    }

    /// Creates a board without any pieces, to be filled with [`Board::put`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            grid: [None; BOARD_SIZE as usize],
            mailbox: &MAILBOX,
            captured_white: Captured::new(),
            captured_black: Captured::new(),
        }
    }

    /// Restores the starting position and forgets all captures.
    pub fn reset(&mut self) {
        self.grid = [None; BOARD_SIZE as usize];
        self.captured_white.clear();
        self.captured_black.clear();
        self.place_starting_pieces();
    }

    fn place_starting_pieces(&mut self) {
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            self.grid[Square::new(file, Rank::Eight) as usize] =
                Some(Piece::new(Player::Black, kind));
            self.grid[Square::new(file, Rank::Seven) as usize] =
                Some(Piece::new(Player::Black, PieceKind::Pawn));
            self.grid[Square::new(file, Rank::Two) as usize] =
                Some(Piece::new(Player::White, PieceKind::Pawn));
            self.grid[Square::new(file, Rank::One) as usize] =
                Some(Piece::new(Player::White, kind));
        }
    }

    /// Returns the piece on the square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.grid[square as usize]
    }

    /// Places a piece on an empty square.
    ///
    /// # Panics
    ///
    /// If the square is already occupied.
    pub fn put(&mut self, square: Square, piece: Piece) {
        assert!(
            self.at(square).is_none(),
            "can't put piece to already occupied square {square}"
        );
        self.grid[square as usize] = Some(piece);
    }

    /// Takes the piece off the square without recording a capture.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.grid[square as usize].take()
    }

    /// Addressing tables used to walk the board.
    #[must_use]
    pub const fn mailbox(&self) -> &'static Mailbox {
        self.mailbox
    }

    /// Pieces of `owner` that were captured so far, in capture order.
    #[must_use]
    pub fn captured(&self, owner: Player) -> &[Piece] {
        match owner {
            Player::White => &self.captured_white,
            Player::Black => &self.captured_black,
        }
    }

    fn captured_mut(&mut self, owner: Player) -> &mut Captured {
        match owner {
            Player::White => &mut self.captured_white,
            Player::Black => &mut self.captured_black,
        }
    }

    /// Occupied squares of `player`.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL.into_iter().filter_map(move |square| match self.at(square) {
            Some(piece) if piece.owner == player => Some((square, piece)),
            _ => None,
        })
    }

    /// Sum of the values of `player`'s pieces on the board, king excluded.
    #[must_use]
    pub fn material(&self, player: Player) -> u32 {
        self.pieces(player)
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .map(|(_, piece)| u32::from(piece.value()))
            .sum()
    }

    /// Moves the piece from `from` to `to` without checking whether the move
    /// is legal and returns the captured piece, if any.
    ///
    /// An opponent's piece standing on `to` is captured and recorded in its
    /// owner's capture buffer. A piece of the mover's own color is simply
    /// replaced. A pawn moving diagonally onto an empty square captures
    /// the opponent's pawn behind it when that pawn is eligible for en
    /// passant. The moved piece is marked as moved, and a pawn advancing by
    /// two ranks becomes eligible for en passant. The eligibility of the
    /// mover's own pieces expires before the move: it only lasts for one
    /// opponent's move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureOverflow`] if the captured piece does not fit
    /// into its owner's capture buffer. The board is not modified in this case.
    ///
    /// # Panics
    ///
    /// If `from` and `to` are the same square or if there is no piece on
    /// `from`.
    pub fn apply(&mut self, from: Square, to: Square) -> Result<Option<Piece>, Error> {
        assert_ne!(from, to, "origin and destination of a move must differ");
        let Some(mut mover) = self.at(from) else {
            panic!("there is no piece to move on {from}");
        };
        let captured_on = self.capture_square(from, to, mover);
        let captured = captured_on.and_then(|square| self.at(square));
        if let Some(piece) = captured {
            self.captured_mut(piece.owner)
                .try_push(piece)
                .map_err(|_| Error::CaptureOverflow { owner: piece.owner })?;
        }
        self.expire_en_passant(mover.owner);
        if let Some(square) = captured_on {
            self.grid[square as usize] = None;
        }
        mover.flags.remove(PieceFlags::EN_PASSANT);
        mover.flags.insert(PieceFlags::MOVED);
        if mover.kind == PieceKind::Pawn
            && from.file() == to.file()
            && from.rank().distance(to.rank()) == 2
        {
            mover.flags.insert(PieceFlags::EN_PASSANT);
        }
        self.grid[from as usize] = None;
        self.grid[to as usize] = Some(mover);
        Ok(captured)
    }

    /// Square of the piece captured by moving `mover` from `from` to `to`.
    fn capture_square(&self, from: Square, to: Square, mover: Piece) -> Option<Square> {
        if let Some(occupant) = self.at(to) {
            return (occupant.owner != mover.owner).then_some(to);
        }
        if mover.kind != PieceKind::Pawn || from.file() == to.file() {
            return None;
        }
        let passed = Square::new(to.file(), from.rank());
        match self.at(passed) {
            Some(piece)
                if piece.owner != mover.owner
                    && piece.kind == PieceKind::Pawn
                    && piece.is_en_passant_eligible() =>
            {
                Some(passed)
            },
            _ => None,
        }
    }

    fn expire_en_passant(&mut self, player: Player) {
        for piece in self.grid.iter_mut().flatten() {
            if piece.owner == player {
                piece.flags.remove(PieceFlags::EN_PASSANT);
            }
        }
    }

    /// Writes the board to `sink`: 8 rows of 8 cells, each cell being the
    /// color letter followed by the piece letter (two spaces for an empty
    /// square).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] on the first failed write. The output may end
    /// in the middle of a row.
    pub fn render<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        for row in self.grid.chunks(BOARD_WIDTH as usize) {
            for square in row {
                sink.write_all(&cell(*square))?;
            }
            sink.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Calculates the pseudo-legal destinations of the piece on `from`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the list of moves can not grow.
    pub fn moves(&self, from: Square) -> Result<MoveList, Error> {
        let mut moves = MoveList::new(from);
        movegen::generate_moves(self, &mut moves)?;
        Ok(moves)
    }

    /// Checks whether `player`'s king is attacked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if a probe move list can not grow.
    ///
    /// # Panics
    ///
    /// If `player` has no king on the board.
    pub fn is_in_check(&self, player: Player) -> Result<bool, Error> {
        attacks::is_in_check(self, player)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

fn cell(square: Option<Piece>) -> [u8; 2] {
    match square {
        Some(piece) => [piece.owner.symbol() as u8, piece.kind.symbol() as u8],
        None => *b"  ",
    }
}

impl fmt::Display for Board {
    /// Same format as [`Board::render`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(BOARD_WIDTH as usize) {
            for square in row {
                let [color, kind] = cell(*square);
                f.write_char(char::from(color))?;
                f.write_char(char::from(kind))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
