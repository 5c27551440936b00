//! Core type definitions.

use std::fmt;

/// Reference to a series within a block.
///
/// Series references are opaque to this crate; only their ordering and
/// identity matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SeriesRef(pub u64);

impl SeriesRef {
    /// Creates a new series reference.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw reference value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for SeriesRef {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SeriesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref:{}", self.0)
    }
}
