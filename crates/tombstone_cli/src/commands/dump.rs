//! Dump command implementation.

use serde::Serialize;
use std::path::Path;
use tombstone_core::{read_file, MemTombstones};

/// One deletion interval for output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IntervalInfo {
    /// Series reference.
    pub series: u64,
    /// First deleted timestamp.
    pub mint: i64,
    /// Last deleted timestamp.
    pub maxt: i64,
}

/// Runs the dump command.
pub fn run(path: &Path, series: &[u64], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (stones, _) = read_file(path)?;
    let intervals = collect(&stones, series);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&intervals)?);
        }
        _ => {
            print_text_output(&intervals);
        }
    }

    Ok(())
}

/// Lists intervals sorted by series, optionally restricted to `filter`.
fn collect(stones: &MemTombstones, filter: &[u64]) -> Vec<IntervalInfo> {
    stones
        .stones()
        .into_iter()
        .filter(|stone| filter.is_empty() || filter.contains(&stone.series.as_u64()))
        .flat_map(|stone| {
            let series = stone.series.as_u64();
            stone.intervals.into_iter().map(move |iv| IntervalInfo {
                series,
                mint: iv.mint,
                maxt: iv.maxt,
            })
        })
        .collect()
}

fn print_text_output(intervals: &[IntervalInfo]) {
    if intervals.is_empty() {
        println!("No tombstones");
        return;
    }
    for info in intervals {
        println!("ref:{:<10} [{}, {}]", info.series, info.mint, info.maxt);
    }
    println!();
    println!("{} interval(s)", intervals.len());
}
