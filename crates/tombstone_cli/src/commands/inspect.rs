//! Inspect command implementation.

use serde::Serialize;
use std::path::Path;
use tombstone_core::{read_file, tombstones_path, MemTombstones, TombstoneReader};

/// Tombstone file inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Block directory path.
    pub path: String,
    /// Tombstone file size in bytes.
    pub file_size: u64,
    /// Number of series with tombstones.
    pub series_count: usize,
    /// Number of deletion intervals.
    pub interval_count: u64,
    /// Smallest deleted timestamp, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_time: Option<i64>,
    /// Largest deleted timestamp, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time: Option<i64>,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !tombstones_path(path).exists() {
        println!("No tombstone file at {:?} (block has no deletions)", path);
        return Ok(());
    }

    let (stones, file_size) = read_file(path)?;
    let result = inspect(path, &stones, file_size);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(path: &Path, stones: &MemTombstones, file_size: u64) -> InspectResult {
    let mut min_time = None;
    let mut max_time = None;
    for stone in stones.stones() {
        if let (Some(first), Some(last)) = (
            stone.intervals.as_slice().first(),
            stone.intervals.as_slice().last(),
        ) {
            min_time = Some(min_time.map_or(first.mint, |t: i64| t.min(first.mint)));
            max_time = Some(max_time.map_or(last.maxt, |t: i64| t.max(last.maxt)));
        }
    }

    InspectResult {
        path: path.display().to_string(),
        file_size,
        series_count: stones.len(),
        interval_count: stones.total(),
        min_time,
        max_time,
    }
}

fn print_text_output(result: &InspectResult) {
    println!("Tombstone File Inspection");
    println!("=========================");
    println!();
    println!("Path: {}", result.path);
    println!("Size: {}", format_size(result.file_size));
    println!();
    println!("Tombstones:");
    println!("  Series:    {}", result.series_count);
    println!("  Intervals: {}", result.interval_count);
    if let (Some(min), Some(max)) = (result.min_time, result.max_time) {
        println!("  Range:     [{}, {}]", min, max);
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tombstone_core::{Interval, SeriesRef};

    #[test]
    fn inspect_reports_range() {
        let stones = MemTombstones::new();
        stones.add_interval(SeriesRef::new(1), [Interval::new(100, 200)]);
        stones.add_interval(SeriesRef::new(2), [Interval::new(5, 5), Interval::new(300, 400)]);

        let result = inspect(Path::new("block"), &stones, 42);

        assert_eq!(result.series_count, 2);
        assert_eq!(result.interval_count, 3);
        assert_eq!(result.min_time, Some(5));
        assert_eq!(result.max_time, Some(400));
    }

    #[test]
    fn inspect_empty_store() {
        let result = inspect(Path::new("block"), &MemTombstones::new(), 9);
        assert_eq!(result.interval_count, 0);
        assert!(result.min_time.is_none());
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(9), "9 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
