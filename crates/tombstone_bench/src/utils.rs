//! Benchmark utilities.

use rand::Rng;
use tombstone_core::{Interval, MemTombstones, SeriesRef};

/// Generate `count` random intervals inside `[0, span)`.
pub fn random_intervals(count: usize, span: i64) -> Vec<Interval> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let mint = rng.gen_range(0..span);
            let len = rng.gen_range(0..span / 100 + 1);
            Interval::new(mint, mint.saturating_add(len))
        })
        .collect()
}

/// Generate a store with `series` series holding `per_series` disjoint intervals each.
pub fn populated_store(series: u64, per_series: i64) -> MemTombstones {
    let stones = MemTombstones::new();
    for s in 0..series {
        stones.add_interval(
            SeriesRef::new(s),
            (0..per_series).map(|i| Interval::new(i * 100, i * 100 + 50)),
        );
    }
    stones
}
