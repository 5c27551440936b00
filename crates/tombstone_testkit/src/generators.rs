//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random intervals and stones.
//! Timestamps are drawn from a narrow window so that overlaps and
//! adjacency are common, plus occasional values at the ends of the
//! `i64` range.

use proptest::prelude::*;
use tombstone_core::{Interval, Intervals, SeriesRef, Stone};

/// Strategy for timestamps, biased towards a small shared window.
pub fn timestamp_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        8 => -50i64..50,
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
    ]
}

/// Strategy for valid intervals (`mint <= maxt`).
pub fn interval_strategy() -> impl Strategy<Value = Interval> {
    (timestamp_strategy(), timestamp_strategy())
        .prop_map(|(a, b)| Interval::new(a.min(b), a.max(b)))
}

/// Strategy for intervals confined to a small window.
///
/// Useful when a test enumerates covered timestamps.
pub fn small_interval_strategy() -> impl Strategy<Value = Interval> {
    (-50i64..50, 0i64..10).prop_map(|(mint, len)| Interval::new(mint, mint + len))
}

/// Strategy for an unordered batch of intervals.
pub fn interval_batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(interval_strategy(), 0..max_len)
}

/// Strategy for an interval set built through the merge.
pub fn intervals_strategy(max_len: usize) -> impl Strategy<Value = Intervals> {
    interval_batch_strategy(max_len).prop_map(|ivs| ivs.into_iter().collect())
}

/// Strategy for series references.
pub fn series_ref_strategy() -> impl Strategy<Value = SeriesRef> {
    prop_oneof![
        4 => (0u64..16).prop_map(SeriesRef::new),
        1 => any::<u64>().prop_map(SeriesRef::new),
    ]
}

/// Strategy for a batch of stones (series may repeat).
pub fn stones_strategy(max_stones: usize) -> impl Strategy<Value = Vec<Stone>> {
    prop::collection::vec(
        (series_ref_strategy(), intervals_strategy(8))
            .prop_map(|(series, intervals)| Stone { series, intervals }),
        0..max_stones,
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
