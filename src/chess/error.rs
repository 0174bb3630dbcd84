//! Recoverable failures of the rules core. Contract violations (e.g. moving
//! from an empty square) are not represented here: they panic.

use std::collections::TryReserveError;
use std::io;

use crate::chess::core::Player;

#[allow(missing_docs)]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The move list could not grow. The list is emptied before this is
    /// returned.
    #[error("move list allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    /// Writing the rendered board to the sink failed. Rendering stops at the
    /// first failed write.
    #[error("board write failed: {0}")]
    Render(#[from] io::Error),
    /// All non-king pieces of `owner` have already been captured; the board is
    /// left unchanged.
    #[error("capture buffer for {owner:?} pieces is full")]
    CaptureOverflow { owner: Player },
}
