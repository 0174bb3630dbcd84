//! Destinations reachable by a single piece.

use std::fmt;
use std::slice;

use crate::chess::core::Square;
use crate::chess::error::Error;

/// Destination squares of the piece standing on [`MoveList::origin`], in the
/// order the move generator discovered them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveList {
    origin: Square,
    destinations: Vec<Square>,
}

impl MoveList {
    /// Creates an empty list of moves from `origin`.
    #[must_use]
    pub const fn new(origin: Square) -> Self {
        Self {
            origin,
            destinations: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn origin(&self) -> Square {
        self.origin
    }

    /// Appends a destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the list can not grow. The callers
    /// expect either a complete list or nothing at all, so every destination
    /// collected so far is dropped, too.
    pub fn push(&mut self, destination: Square) -> Result<(), Error> {
        if let Err(e) = self.destinations.try_reserve(1) {
            self.clear();
            return Err(e.into());
        }
        self.destinations.push(destination);
        Ok(())
    }

    /// Releases all destinations. Calling it on an empty list is a no-op.
    pub fn clear(&mut self) {
        self.destinations = Vec::new();
    }

    /// Releases all destinations and retargets the list to a new origin so
    /// that it can be reused for another query.
    pub fn reset(&mut self, origin: Square) {
        self.clear();
        self.origin = origin;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn contains(&self, destination: Square) -> bool {
        self.destinations.contains(&destination)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn as_slice(&self) -> &[Square] {
        &self.destinations
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> slice::Iter<'_, Square> {
        self.destinations.iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type IntoIter = slice::Iter<'a, Square>;
    type Item = &'a Square;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for MoveList {
    /// Lists the destinations after the origin, e.g. `e2: e3 e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.origin)?;
        for destination in self {
            write!(f, " {destination}")?;
        }
        Ok(())
    }
}
