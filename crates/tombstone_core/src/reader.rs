//! Tombstone reader trait definition.

use crate::error::TombstoneResult;
use crate::interval::Intervals;
use crate::types::SeriesRef;
use std::sync::Arc;

/// Read access to deletion intervals by series reference.
///
/// Readers hide the backing store. The in-memory [`super::MemTombstones`]
/// is the only implementation shipped here, but the trait is kept narrow
/// so an on-disk form can implement it without exposing its layout.
///
/// # Invariants
///
/// - Every [`Intervals`] handed out satisfies the ordering, overlap and
///   adjacency invariants
/// - `get` returns an owned copy that later mutations cannot observe
pub trait TombstoneReader: Send + Sync {
    /// Returns the deletion intervals for `series`.
    ///
    /// An unknown series yields an empty set, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, series: SeriesRef) -> TombstoneResult<Intervals>;

    /// Calls `f` once for each series that has tombstones.
    ///
    /// Iteration order is unspecified. The first error returned by `f`
    /// stops iteration and is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the callback's error, or an error from the backing store.
    fn iter(
        &self,
        f: &mut dyn FnMut(SeriesRef, &Intervals) -> TombstoneResult<()>,
    ) -> TombstoneResult<()>;

    /// Returns the total number of intervals across all series.
    fn total(&self) -> u64;

    /// Releases any underlying resources.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing resources fails.
    fn close(&self) -> TombstoneResult<()>;
}

impl<R: TombstoneReader + ?Sized> TombstoneReader for Arc<R> {
    fn get(&self, series: SeriesRef) -> TombstoneResult<Intervals> {
        (**self).get(series)
    }

    fn iter(
        &self,
        f: &mut dyn FnMut(SeriesRef, &Intervals) -> TombstoneResult<()>,
    ) -> TombstoneResult<()> {
        (**self).iter(f)
    }

    fn total(&self) -> u64 {
        (**self).total()
    }

    fn close(&self) -> TombstoneResult<()> {
        (**self).close()
    }
}

impl<R: TombstoneReader + ?Sized> TombstoneReader for Box<R> {
    fn get(&self, series: SeriesRef) -> TombstoneResult<Intervals> {
        (**self).get(series)
    }

    fn iter(
        &self,
        f: &mut dyn FnMut(SeriesRef, &Intervals) -> TombstoneResult<()>,
    ) -> TombstoneResult<()> {
        (**self).iter(f)
    }

    fn total(&self) -> u64 {
        (**self).total()
    }

    fn close(&self) -> TombstoneResult<()> {
        (**self).close()
    }
}
