//! The engine exposes the rules core through a line-based text protocol in the
//! manner of the [Universal Chess Interface] (UCI): each input line is a
//! command, responses and diagnostics (`info string ...`) are written to the
//! output stream.
//!
//! [`Engine::run`] is the "main loop" of the engine which communicates with the
//! environment and executes commands from the input stream.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

use std::io::{BufRead, Write};

use anyhow::bail;
use itertools::Itertools;

use crate::chess::attacks;
use crate::chess::board::Board;
use crate::chess::core::{Piece, Player, Square};
use crate::engine::command::Command;

mod command;

/// Two-letter representation of a piece, the same as in the rendered board.
fn cell(piece: Piece) -> String {
    format!("{}{}", piece.owner.symbol(), piece.kind.symbol())
}

/// The Engine owns the board and handles the commands read from the input,
/// including I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    board: Board,
    debug: bool,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            board: Board::starting(),
            debug: false,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is exhausted.
    ///
    /// Malformed commands do not stop the loop: the problem is reported as
    /// `info string Error: ...` and the next line is read.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "info string Error: {e:#}")?;
                    continue;
                },
            };
            let result = match command {
                Command::NewGame => {
                    self.board.reset();
                    Ok(())
                },
                Command::Show => self.handle_show(),
                Command::Move { from, to } => self.handle_move(from, to),
                Command::Moves { from } => self.handle_moves(from),
                Command::Check { player } => self.handle_check(player),
                Command::Attacked { square, defender } => self.handle_attacked(square, defender),
                Command::Captured => self.handle_captured(),
                Command::Put { square, piece } => self.handle_put(square, piece),
                Command::Clear { square } => self.handle_clear(square),
                Command::Debug { on } => {
                    self.debug = on;
                    Ok(())
                },
                Command::Version => self.handle_version(),
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")
                        .map_err(Into::into)
                },
            };
            if let Err(e) = result {
                writeln!(self.output, "info string Error: {e:#}")?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Writes a diagnostic line if `debug on` was requested.
    fn info(&mut self, message: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.debug {
            writeln!(self.output, "info string {}", message())?;
        }
        Ok(())
    }

    fn handle_show(&mut self) -> anyhow::Result<()> {
        self.board.render(&mut *self.output)?;
        Ok(())
    }

    fn handle_move(&mut self, from: Square, to: Square) -> anyhow::Result<()> {
        if from == to {
            bail!("origin and destination of a move must differ, got {from}{to}");
        }
        let Some(mover) = self.board.at(from) else {
            bail!("there is no piece to move on {from}");
        };
        let captured = self.board.apply(from, to)?;
        if let Some(piece) = captured {
            writeln!(self.output, "captured {}", cell(piece))?;
        }
        let (white, black) = (
            self.board.material(Player::White),
            self.board.material(Player::Black),
        );
        self.info(|| format!("{} {from}{to}, material: w {white} b {black}", cell(mover)))
    }

    fn handle_moves(&mut self, from: Square) -> anyhow::Result<()> {
        let moves = self.board.moves(from)?;
        writeln!(self.output, "moves {moves}")?;
        self.info(|| format!("{} pseudo-legal moves from {from}", moves.len()))
    }

    fn handle_check(&mut self, player: Player) -> anyhow::Result<()> {
        let Some(king) = attacks::find_king(&self.board, player) else {
            bail!("{player:?} king is not on the board");
        };
        let in_check = attacks::is_king_attacked_at(&self.board, king)?;
        writeln!(self.output, "check {player} {in_check}")?;
        Ok(())
    }

    fn handle_attacked(&mut self, square: Square, defender: Player) -> anyhow::Result<()> {
        let attacked = attacks::is_attacked(&self.board, square, defender)?;
        writeln!(self.output, "attacked {square} {attacked}")?;
        Ok(())
    }

    fn handle_captured(&mut self) -> anyhow::Result<()> {
        for player in [Player::White, Player::Black] {
            writeln!(
                self.output,
                "captured {player}:{}",
                self.board
                    .captured(player)
                    .iter()
                    .map(|&piece| format!(" {}", cell(piece)))
                    .join("")
            )?;
        }
        Ok(())
    }

    fn handle_put(&mut self, square: Square, piece: Piece) -> anyhow::Result<()> {
        if let Some(occupant) = self.board.at(square) {
            bail!("square {square} is already occupied by {}", cell(occupant));
        }
        self.board.put(square, piece);
        Ok(())
    }

    fn handle_clear(&mut self, square: Square) -> anyhow::Result<()> {
        match self.board.remove(square) {
            Some(piece) => self.info(|| format!("removed {} from {square}", cell(piece))),
            None => self.info(|| format!("{square} is already empty")),
        }
    }

    /// Identifies the engine and the build it was produced by.
    fn handle_version(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "id name {}", env!("CARGO_PKG_NAME"))?;
        writeln!(self.output, "id version {}", crate::engine_version())?;
        writeln!(self.output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        Ok(())
    }
}
