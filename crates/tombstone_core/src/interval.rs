//! Deletion intervals and their merge algebra.
//!
//! Timestamps are discrete, so two closed intervals that are one step
//! apart (`a.maxt + 1 == b.mint`) cover a contiguous range and are kept
//! as a single interval.

use std::fmt;

/// A closed time range `[mint, maxt]` whose samples are deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First deleted timestamp (inclusive).
    pub mint: i64,
    /// Last deleted timestamp (inclusive).
    pub maxt: i64,
}

impl Interval {
    /// Creates a new interval.
    ///
    /// The caller is responsible for `mint <= maxt`; see [`Interval::is_valid`].
    #[must_use]
    pub const fn new(mint: i64, maxt: i64) -> Self {
        Self { mint, maxt }
    }

    /// Returns true if `mint <= maxt`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.mint <= self.maxt
    }

    /// Returns true if `t` lies within this interval.
    #[must_use]
    pub const fn in_bounds(&self, t: i64) -> bool {
        t >= self.mint && t <= self.maxt
    }

    /// Returns true if a single interval of `ranges` covers this one entirely.
    #[must_use]
    pub fn is_subrange(&self, ranges: &Intervals) -> bool {
        ranges
            .iter()
            .any(|r| r.in_bounds(self.mint) && r.in_bounds(self.maxt))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.mint, self.maxt)
    }
}

/// An ordered set of deletion intervals.
///
/// # Invariants
///
/// - Intervals are strictly increasing by `mint`
/// - No two intervals overlap
/// - No two intervals are adjacent (`a.maxt + 1 == b.mint`)
///
/// The only way to grow a set is [`Intervals::add`], which keeps all
/// three invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Intervals(Vec<Interval>);

impl Intervals {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Merges `n` into the set.
    ///
    /// Every existing interval that overlaps or touches `n` is collapsed
    /// together with it into one interval. Runs in `O(log n + k)` where
    /// `k` is the number of absorbed intervals.
    pub fn add(&mut self, n: Interval) {
        let len = self.0.len();
        if len == 0 {
            self.0.push(n);
            return;
        }

        // `i64::MIN` has no predecessor, so everything is a candidate.
        let mini = if n.mint == i64::MIN {
            0
        } else {
            let mini = self.0.partition_point(|iv| iv.maxt < n.mint - 1);
            if mini == len {
                self.0.push(n);
                return;
            }
            mini
        };

        // Number of intervals from `mini` that overlap or touch `n`.
        let maxi = if n.maxt == i64::MAX {
            len - mini
        } else {
            let maxi = self.0[mini..].partition_point(|iv| iv.mint <= n.maxt + 1);
            if maxi == 0 {
                self.0.insert(mini, n);
                return;
            }
            maxi
        };

        let merged = Interval {
            mint: n.mint.min(self.0[mini].mint),
            maxt: n.maxt.max(self.0[mini + maxi - 1].maxt),
        };
        self.0.splice(mini..mini + maxi, std::iter::once(merged));
    }

    /// Returns true if `t` is covered by any interval.
    #[must_use]
    pub fn contains(&self, t: i64) -> bool {
        let idx = self.0.partition_point(|iv| iv.maxt < t);
        self.0.get(idx).is_some_and(|iv| iv.in_bounds(t))
    }

    /// Returns the number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no intervals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the intervals in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    /// Returns the intervals as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    /// Returns the intervals with `maxt >= t` as a new set.
    ///
    /// The scan runs from the newest interval backwards and stops at the
    /// first one entirely before `t`. Intervals straddling `t` are kept whole.
    #[must_use]
    pub fn suffix_from(&self, t: i64) -> Self {
        let mut start = self.0.len();
        while start > 0 && self.0[start - 1].maxt >= t {
            start -= 1;
        }
        Self(self.0[start..].to_vec())
    }
}

impl FromIterator<Interval> for Intervals {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = Self::new();
        for iv in iter {
            set.add(iv);
        }
        set
    }
}

impl<'a> IntoIterator for &'a Intervals {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Intervals {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ivs: &[(i64, i64)]) -> Intervals {
        ivs.iter().map(|&(a, b)| Interval::new(a, b)).collect()
    }

    fn pairs(ivs: &Intervals) -> Vec<(i64, i64)> {
        ivs.iter().map(|iv| (iv.mint, iv.maxt)).collect()
    }

    #[test]
    fn add_to_empty() {
        let mut ivs = Intervals::new();
        ivs.add(Interval::new(1, 2));
        assert_eq!(pairs(&ivs), vec![(1, 2)]);
    }

    #[test]
    fn add_disjoint_keeps_order() {
        let ivs = set(&[(40, 50), (1, 2), (10, 20)]);
        assert_eq!(pairs(&ivs), vec![(1, 2), (10, 20), (40, 50)]);
    }

    #[test]
    fn add_appends_after_last() {
        let mut ivs = set(&[(1, 2)]);
        ivs.add(Interval::new(10, 11));
        assert_eq!(pairs(&ivs), vec![(1, 2), (10, 11)]);
    }

    #[test]
    fn add_inserts_in_gap() {
        let mut ivs = set(&[(1, 2), (20, 30)]);
        ivs.add(Interval::new(10, 11));
        assert_eq!(pairs(&ivs), vec![(1, 2), (10, 11), (20, 30)]);
    }

    #[test]
    fn add_merges_adjacent() {
        let mut ivs = set(&[(1, 2), (5, 6)]);
        ivs.add(Interval::new(3, 4));
        assert_eq!(pairs(&ivs), vec![(1, 6)]);
    }

    #[test]
    fn add_merges_adjacent_on_left_only() {
        let mut ivs = set(&[(1, 2), (10, 20)]);
        ivs.add(Interval::new(3, 5));
        assert_eq!(pairs(&ivs), vec![(1, 5), (10, 20)]);
    }

    #[test]
    fn add_merges_adjacent_on_right_only() {
        let mut ivs = set(&[(1, 2), (10, 20)]);
        ivs.add(Interval::new(5, 9));
        assert_eq!(pairs(&ivs), vec![(1, 2), (5, 20)]);
    }

    #[test]
    fn add_subsuming_interval() {
        let mut ivs = set(&[(1, 2), (5, 6), (10, 12), (30, 40)]);
        ivs.add(Interval::new(0, 20));
        assert_eq!(pairs(&ivs), vec![(0, 20), (30, 40)]);
    }

    #[test]
    fn add_partial_overlaps() {
        let mut ivs = set(&[(1, 10), (20, 30)]);
        ivs.add(Interval::new(5, 25));
        assert_eq!(pairs(&ivs), vec![(1, 30)]);
    }

    #[test]
    fn add_covered_interval_is_noop() {
        let mut ivs = set(&[(1, 10), (20, 30)]);
        let before = ivs.clone();
        ivs.add(Interval::new(3, 7));
        ivs.add(Interval::new(20, 30));
        assert_eq!(ivs, before);
    }

    #[test]
    fn add_at_min_timestamp() {
        let mut ivs = set(&[(-10, -5), (10, 20)]);
        ivs.add(Interval::new(i64::MIN, -20));
        assert_eq!(pairs(&ivs), vec![(i64::MIN, -20), (-10, -5), (10, 20)]);

        ivs.add(Interval::new(i64::MIN, 0));
        assert_eq!(pairs(&ivs), vec![(i64::MIN, 0), (10, 20)]);
    }

    #[test]
    fn add_at_max_timestamp() {
        let mut ivs = set(&[(-10, -5), (10, 20)]);
        ivs.add(Interval::new(30, i64::MAX));
        assert_eq!(pairs(&ivs), vec![(-10, -5), (10, 20), (30, i64::MAX)]);

        ivs.add(Interval::new(15, i64::MAX));
        assert_eq!(pairs(&ivs), vec![(-10, -5), (10, i64::MAX)]);
    }

    #[test]
    fn add_full_range() {
        let mut ivs = set(&[(-10, -5), (10, 20)]);
        ivs.add(Interval::new(i64::MIN, i64::MAX));
        assert_eq!(pairs(&ivs), vec![(i64::MIN, i64::MAX)]);
    }

    #[test]
    fn add_max_timestamp_after_middle() {
        let mut ivs = set(&[(1, 2), (5, 6), (9, 10)]);
        ivs.add(Interval::new(6, i64::MAX));
        assert_eq!(pairs(&ivs), vec![(1, 2), (5, i64::MAX)]);
    }

    #[test]
    fn in_bounds_is_inclusive() {
        let iv = Interval::new(10, 20);
        assert!(iv.in_bounds(10));
        assert!(iv.in_bounds(20));
        assert!(!iv.in_bounds(9));
        assert!(!iv.in_bounds(21));
    }

    #[test]
    fn is_subrange() {
        let ivs = set(&[(1, 10), (20, 30)]);
        assert!(Interval::new(2, 9).is_subrange(&ivs));
        assert!(Interval::new(20, 30).is_subrange(&ivs));
        assert!(!Interval::new(5, 25).is_subrange(&ivs));
        assert!(!Interval::new(11, 12).is_subrange(&Intervals::new()));
    }

    #[test]
    fn contains() {
        let ivs = set(&[(1, 10), (20, 30)]);
        assert!(ivs.contains(1));
        assert!(ivs.contains(25));
        assert!(!ivs.contains(15));
        assert!(!ivs.contains(31));
    }

    #[test]
    fn suffix_from_boundary() {
        let ivs = set(&[(10, 20), (25, 30), (40, 50)]);
        assert_eq!(pairs(&ivs.suffix_from(26)), vec![(25, 30), (40, 50)]);
        assert_eq!(pairs(&ivs.suffix_from(30)), vec![(25, 30), (40, 50)]);
        assert_eq!(pairs(&ivs.suffix_from(31)), vec![(40, 50)]);
        assert!(ivs.suffix_from(51).is_empty());
        assert_eq!(ivs.suffix_from(i64::MIN), ivs);
    }

    #[test]
    fn interval_display() {
        assert_eq!(Interval::new(-1, 5).to_string(), "[-1, 5]");
    }
}
