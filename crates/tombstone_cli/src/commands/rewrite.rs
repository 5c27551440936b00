//! Truncate and delete commands.
//!
//! Both load the tombstone file, apply the mutation in memory and replace
//! the file atomically.

use std::path::Path;
use tombstone_core::{read_file, write_file, MemTombstones, SeriesRef, TombstoneReader};
use tracing::info;

/// Runs the truncate command.
pub fn truncate(path: &Path, before: i64, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!("Truncating tombstones of {:?} before {}", path, before);
    rewrite(path, dry_run, |stones| stones.truncate_before(before))
}

/// Runs the delete command.
pub fn delete(path: &Path, series: &[u64], dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!("Deleting tombstones of {} series in {:?}", series.len(), path);
    rewrite(path, dry_run, |stones| {
        stones.delete_tombstones(series.iter().copied().map(SeriesRef::new));
    })
}

fn rewrite(
    path: &Path,
    dry_run: bool,
    mutate: impl FnOnce(&MemTombstones),
) -> Result<(), Box<dyn std::error::Error>> {
    let (stones, bytes_read) = read_file(path)?;
    let before = stones.total();

    mutate(&stones);
    let after = stones.total();

    println!("Intervals: {} -> {}", before, after);

    if dry_run {
        println!("Dry run - tombstone file not modified");
        return Ok(());
    }
    if before == after {
        println!("Nothing to do");
        return Ok(());
    }

    let written = write_file(path, &stones)?;
    println!("✓ Tombstone file rewritten ({} -> {} bytes)", bytes_read, written);

    Ok(())
}
