//! In-memory tombstone store.

use crate::error::TombstoneResult;
use crate::interval::{Interval, Intervals};
use crate::reader::TombstoneReader;
use crate::types::SeriesRef;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{trace, warn};

/// A series reference together with its deletion intervals.
///
/// Stones are a transient view used for bulk snapshots and bulk loads;
/// they are never persisted as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stone {
    /// The series the intervals belong to.
    pub series: SeriesRef,
    /// The deleted time ranges.
    pub intervals: Intervals,
}

/// A mutable, in-memory tombstone store.
///
/// # Thread Safety
///
/// A single reader/writer lock guards the whole map. Any number of
/// `get`, `iter` and `total` calls may run together; `add_interval`,
/// `delete_tombstones` and `truncate_before` are exclusive. Concurrent
/// writers are only ordered by lock acquisition.
///
/// # Example
///
/// ```rust
/// use tombstone_core::{Interval, MemTombstones, SeriesRef, TombstoneReader};
///
/// let stones = MemTombstones::new();
/// stones.add_interval(SeriesRef::new(1), [Interval::new(10, 20), Interval::new(21, 30)]);
/// let ivs = stones.get(SeriesRef::new(1)).unwrap();
/// assert_eq!(ivs.as_slice(), &[Interval::new(10, 30)]);
/// ```
#[derive(Debug, Default)]
pub struct MemTombstones {
    groups: RwLock<HashMap<SeriesRef, Intervals>>,
}

impl MemTombstones {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store where `groups[i]` belongs to series `i + 1`.
    ///
    /// Useful for building fixtures.
    #[must_use]
    pub fn from_groups(groups: Vec<Intervals>) -> Self {
        let stones = Self::new();
        for (i, group) in groups.into_iter().enumerate() {
            stones.add_interval(SeriesRef::new(i as u64 + 1), group);
        }
        stones
    }

    /// Creates a store from a batch of stones.
    ///
    /// Stones for the same series are merged.
    #[must_use]
    pub fn from_stones(stones: impl IntoIterator<Item = Stone>) -> Self {
        let store = Self::new();
        for stone in stones {
            store.add_interval(stone.series, stone.intervals);
        }
        store
    }

    /// Returns a snapshot of every entry, sorted by series reference.
    #[must_use]
    pub fn stones(&self) -> Vec<Stone> {
        let groups = self.groups.read();
        let mut stones: Vec<Stone> = groups
            .iter()
            .map(|(&series, intervals)| Stone {
                series,
                intervals: intervals.clone(),
            })
            .collect();
        stones.sort_by_key(|s| s.series);
        stones
    }

    /// Merges each interval into the set for `series`.
    ///
    /// Creates the entry if it does not exist. Inverted intervals
    /// (`mint > maxt`) cannot be represented and are skipped.
    pub fn add_interval(&self, series: SeriesRef, intervals: impl IntoIterator<Item = Interval>) {
        let mut groups = self.groups.write();
        for iv in intervals {
            if !iv.is_valid() {
                warn!(%series, mint = iv.mint, maxt = iv.maxt, "skipping inverted interval");
                continue;
            }
            groups.entry(series).or_default().add(iv);
        }
    }

    /// Removes all tombstones of the given series.
    pub fn delete_tombstones(&self, refs: impl IntoIterator<Item = SeriesRef>) {
        let mut groups = self.groups.write();
        for series in refs {
            groups.remove(&series);
        }
    }

    /// Drops every interval that ends before `before`.
    ///
    /// An interval survives iff `maxt >= before`; surviving intervals are
    /// kept whole. Series left without intervals are removed.
    pub fn truncate_before(&self, before: i64) {
        let mut groups = self.groups.write();
        groups.retain(|series, intervals| {
            let kept = intervals.suffix_from(before);
            if kept.is_empty() {
                trace!(%series, before, "dropping truncated tombstones");
                return false;
            }
            *intervals = kept;
            true
        });
    }

    /// Returns the number of series with tombstones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    /// Returns true if no series has tombstones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

impl TombstoneReader for MemTombstones {
    fn get(&self, series: SeriesRef) -> TombstoneResult<Intervals> {
        let groups = self.groups.read();
        Ok(groups.get(&series).cloned().unwrap_or_default())
    }

    fn iter(
        &self,
        f: &mut dyn FnMut(SeriesRef, &Intervals) -> TombstoneResult<()>,
    ) -> TombstoneResult<()> {
        let groups = self.groups.read();
        for (&series, intervals) in groups.iter() {
            f(series, intervals)?;
        }
        Ok(())
    }

    fn total(&self) -> u64 {
        let groups = self.groups.read();
        groups.values().map(|ivs| ivs.len() as u64).sum()
    }

    fn close(&self) -> TombstoneResult<()> {
        Ok(())
    }
}
