//! Test fixtures and block directory helpers.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tombstone_core::{
    read_file, tombstones_path, write_file, Interval, Intervals, MemTombstones, SeriesRef,
    TombstoneReader, TombstoneResult,
};

/// A temporary block directory with automatic cleanup.
pub struct TempBlock {
    dir: TempDir,
}

impl TempBlock {
    /// Creates a new empty block directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the block directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `reader` as this block's tombstone file.
    pub fn write(&self, reader: &dyn TombstoneReader) -> TombstoneResult<u64> {
        write_file(self.path(), reader)
    }

    /// Reads this block's tombstone file.
    pub fn read(&self) -> TombstoneResult<(MemTombstones, u64)> {
        read_file(self.path())
    }

    /// Returns the raw bytes of the tombstone file.
    pub fn raw(&self) -> Vec<u8> {
        fs::read(tombstones_path(self.path())).expect("Failed to read tombstone file")
    }

    /// Overwrites the tombstone file with arbitrary bytes.
    pub fn write_raw(&self, data: &[u8]) {
        fs::write(tombstones_path(self.path()), data).expect("Failed to write tombstone file");
    }

    /// Returns the on-disk length of the tombstone file.
    pub fn file_len(&self) -> u64 {
        fs::metadata(tombstones_path(self.path()))
            .expect("Failed to stat tombstone file")
            .len()
    }
}

impl Default for TempBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an interval set from `(mint, maxt)` pairs.
pub fn intervals(pairs: &[(i64, i64)]) -> Intervals {
    pairs
        .iter()
        .map(|&(mint, maxt)| Interval::new(mint, maxt))
        .collect()
}

/// Builds a store where `groups[i]` belongs to series `i + 1`.
pub fn mem_tombstones_from_groups(groups: &[&[(i64, i64)]]) -> MemTombstones {
    MemTombstones::from_groups(groups.iter().map(|g| intervals(g)).collect())
}

/// Returns every timestamp in `window` covered by `ranges`.
pub fn covered_points<'a>(
    ranges: impl IntoIterator<Item = &'a Interval>,
    window: std::ops::RangeInclusive<i64>,
) -> BTreeSet<i64> {
    let mut points = BTreeSet::new();
    for iv in ranges {
        let lo = iv.mint.max(*window.start());
        let hi = iv.maxt.min(*window.end());
        if lo <= hi {
            points.extend(lo..=hi);
        }
    }
    points
}

/// Checks ordering, overlap and adjacency of `ivs`.
///
/// Returns a description of the first violation found.
pub fn check_invariants(ivs: &Intervals) -> Result<(), String> {
    for iv in ivs {
        if !iv.is_valid() {
            return Err(format!("inverted interval {iv}"));
        }
    }
    for pair in ivs.as_slice().windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.mint >= b.mint {
            return Err(format!("{a} does not precede {b}"));
        }
        if a.maxt >= b.mint || a.maxt + 1 == b.mint {
            return Err(format!("{a} overlaps or touches {b}"));
        }
    }
    Ok(())
}

/// Collects a reader's contents as sorted `(series, intervals)` pairs.
pub fn snapshot(reader: &dyn TombstoneReader) -> Vec<(SeriesRef, Intervals)> {
    let mut out = Vec::new();
    reader
        .iter(&mut |series, ivs| {
            out.push((series, ivs.clone()));
            Ok(())
        })
        .expect("Iteration failed");
    out.sort_by_key(|(series, _)| *series);
    out
}
