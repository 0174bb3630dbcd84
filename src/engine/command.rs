use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::core::{Piece, Player, Square};

/// Commands understood by [`crate::Engine`], one per input line.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    NewGame,
    Show,
    Move { from: Square, to: Square },
    Moves { from: Square },
    Check { player: Player },
    Attacked { square: Square, defender: Player },
    Captured,
    Put { square: Square, piece: Piece },
    Clear { square: Square },
    Debug { on: bool },
    Version,
    Quit,
    Unknown(String),
}

fn parse_square(token: Option<&str>) -> anyhow::Result<Square> {
    let token = token.context("expected a square")?;
    Square::try_from(token)
}

fn parse_player(token: Option<&str>) -> anyhow::Result<Player> {
    let token = token.context("expected a player (w or b)")?;
    Player::try_from(token)
}

fn parse_piece(token: Option<&str>) -> anyhow::Result<Piece> {
    let token = token.context("expected a piece symbol")?;
    match token.chars().exactly_one() {
        Ok(symbol) => Piece::try_from(symbol),
        Err(_) => bail!("piece symbol should be a single char, got {token}"),
    }
}

/// Accepts both `e2e4` and `e2 e4`.
fn parse_move(parts: &[&str]) -> anyhow::Result<Command> {
    let (from, to) = match parts {
        [joined] => match (joined.get(..2), joined.get(2..)) {
            (Some(from), Some(to)) if !to.is_empty() => (from, to),
            _ => bail!("move should be <from><to>, got {joined}"),
        },
        [from, to] => (*from, *to),
        _ => bail!("move should be <from><to>, got {:?}", parts.join(" ")),
    };
    Ok(Command::Move {
        from: Square::try_from(from)?,
        to: Square::try_from(to)?,
    })
}

/// Fails if any argument was left unparsed.
#[allow(single_use_lifetimes)]
fn ensure_consumed<'a>(mut rest: impl Iterator<Item = &'a str>) -> anyhow::Result<()> {
    let rest = rest.join(" ");
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest}");
    }
    Ok(())
}

impl Command {
    /// Parses a single line of input.
    ///
    /// # Errors
    ///
    /// Returns an error when a known command has malformed arguments. Unknown
    /// commands are not errors: they are reported as [`Command::Unknown`].
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&name, arguments)) = parts.split_first() else {
            return Ok(Self::Unknown(input.to_string()));
        };
        let mut arguments_iter = arguments.iter().copied();
        let command = match name {
            "new" => Self::NewGame,
            "d" | "board" => Self::Show,
            "move" => parse_move(&arguments_iter.by_ref().collect_vec())?,
            "moves" => Self::Moves {
                from: parse_square(arguments_iter.next())?,
            },
            "check" => Self::Check {
                player: parse_player(arguments_iter.next())?,
            },
            "attacked" => Self::Attacked {
                square: parse_square(arguments_iter.next())?,
                defender: parse_player(arguments_iter.next())?,
            },
            "captured" => Self::Captured,
            "put" => Self::Put {
                square: parse_square(arguments_iter.next())?,
                piece: parse_piece(arguments_iter.next())?,
            },
            "clear" => Self::Clear {
                square: parse_square(arguments_iter.next())?,
            },
            "debug" => match arguments_iter.next() {
                Some("on") => Self::Debug { on: true },
                Some("off") => Self::Debug { on: false },
                other => bail!("debug expects on or off, got {:?}", other.unwrap_or_default()),
            },
            "version" => Self::Version,
            "quit" => Self::Quit,
            _ => return Ok(Self::Unknown(input.trim().to_string())),
        };
        ensure_consumed(arguments_iter)?;
        Ok(command)
    }
}
