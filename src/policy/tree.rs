//! Tie-aware top-N over ordered rank buckets.
//!
//! Keeps the greatest `n` elements and, depending on the configured ceiling,
//! the elements tied with the `n`th one. Storage is a [`RankBuckets`] map:
//! one bucket per distinct rank, keyed by the first element to reach that
//! rank, with later ties queued behind it in arrival order.
//!
//! ## Architecture
//!
//! ```text
//!   n = 3, max = 5, offered: 4, 3, 3, 3, 3, 1, 5
//!
//!   after 4,3,3,3      buckets: {4: [], 3: [3', 3'']}            len 4
//!   add(3)             ties the 3rd element, len 4 < max → keep  len 5
//!   add(1)             below the lowest rank → rejected
//!   add(5)             beats rank 3; bucket still covers position 3,
//!                      len == max → drop newest tie (3''')
//!                      buckets: {5: [], 4: [], 3: [3', 3'']}      len 5
//! ```
//!
//! ## Admission Rules
//!
//! Once at least `n` elements are stored, the lowest bucket is the boundary
//! rank. An incoming element is compared against its key:
//!
//! | Incoming vs boundary | Action                                             |
//! |----------------------|----------------------------------------------------|
//! | greater              | evict (see below), then insert                     |
//! | equal                | insert only while `len < max`                      |
//! | less                 | reject                                             |
//!
//! When a greater element arrives and the boundary bucket starts exactly at
//! rank `n`, every element of that bucket falls to rank `n + 1` and the
//! whole bucket is dropped. Otherwise the bucket still reaches rank `n`;
//! only the newest tie is dropped, and only if the ceiling is reached.
//!
//! ## Tie Modes
//!
//! - strict (`max == n`): the `n`th element's later ties are rejected
//! - bounded (`n < max`): ties kept until `max` elements are stored
//! - lenient (unbounded): ties with the `n`th element are always kept
//!
//! ## Performance
//!
//! | Operation  | Time         | Notes                                  |
//! |------------|--------------|----------------------------------------|
//! | `add`      | O(log b)     | b = distinct ranks; O(log b + k) when  |
//! |            |              | a k-element bucket is dropped          |
//! | `contains` | O(log b + k) | floor bucket and its ties              |
//! | `iter`     | O(len)       | descending, ties oldest-first          |
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::policy::tree::TreeTopN;
//! use rankkit::traits::TopN;
//!
//! let mut strict = TreeTopN::new(3);
//! strict.add_all([1, 1, 2, 2, 3, 3, 4, 4]);
//! assert_eq!(strict.to_vec(), vec![4, 4, 3]);
//!
//! let mut lenient = TreeTopN::lenient(3);
//! lenient.add_all([1, 1, 2, 2, 3, 3, 4, 4]);
//! assert_eq!(lenient.to_vec(), vec![4, 4, 3, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::config::{TieMode, TopNConfig};
use crate::ds::rank_buckets::{Iter, RankBuckets};
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::traits::TopN;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TopNMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TopNMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, TopNMetricsRecorder, TreeMetricsRecorder,
};

/// Top-N container that can keep ties at the `n`th rank.
///
/// # Example
///
/// ```
/// use rankkit::policy::tree::TreeTopN;
/// use rankkit::traits::TopN;
///
/// let mut top = TreeTopN::with_max(2, 3);
/// top.add_all([5, 3, 3, 3]);
/// assert_eq!(top.to_vec(), vec![5, 3, 3]);
/// assert_eq!(top.max_len(), Some(3));
/// ```
#[derive(Clone)]
pub struct TreeTopN<E> {
    buckets: RankBuckets<E>,
    config: TopNConfig,
    #[cfg(feature = "metrics")]
    metrics: TopNMetrics,
}

impl<E: Ord> TreeTopN<E> {
    /// Strict container keeping exactly the top `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        Self::unwrap_config(TopNConfig::strict(n))
    }

    /// Keeps the top `n` plus boundary ties, up to `max` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or `max < n`.
    pub fn with_max(n: usize, max: usize) -> Self {
        Self::unwrap_config(TopNConfig::new(n, max))
    }

    /// Keeps the top `n` and every element tied with the `n`th.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn lenient(n: usize) -> Self {
        Self::unwrap_config(TopNConfig::unbounded(n))
    }

    /// `true` behaves like [`lenient`](Self::lenient), `false` like
    /// [`new`](Self::new).
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn with_lenient(n: usize, lenient: bool) -> Self {
        Self::unwrap_config(TopNConfig::lenient(n, lenient))
    }

    pub fn try_new(n: usize) -> Result<Self, ConfigError> {
        TopNConfig::strict(n).map(Self::from_config)
    }

    pub fn try_with_max(n: usize, max: usize) -> Result<Self, ConfigError> {
        TopNConfig::new(n, max).map(Self::from_config)
    }

    pub fn try_lenient(n: usize) -> Result<Self, ConfigError> {
        TopNConfig::unbounded(n).map(Self::from_config)
    }

    /// Creates an empty container from a validated configuration.
    pub fn from_config(config: TopNConfig) -> Self {
        debug!(
            n = config.target(),
            max = ?config.max_len(),
            "tree top-n created"
        );
        Self {
            buckets: RankBuckets::new(),
            config,
            #[cfg(feature = "metrics")]
            metrics: TopNMetrics::default(),
        }
    }

    fn unwrap_config(config: Result<TopNConfig, ConfigError>) -> Self {
        match config {
            Ok(config) => Self::from_config(config),
            Err(e) => panic!("{}", e),
        }
    }

    pub fn config(&self) -> TopNConfig {
        self.config
    }

    pub fn tie_mode(&self) -> TieMode {
        self.config.tie_mode()
    }

    /// Number of distinct ranks currently stored.
    pub fn rank_count(&self) -> usize {
        self.buckets.bucket_count()
    }

    fn accept(&mut self, elem: E) -> bool {
        self.buckets.insert(elem);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_accepted();
            if self.buckets.len() > self.config.target() {
                self.metrics.record_overflow_accept();
            }
        }
        true
    }

    fn reject(&mut self) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_rejected();
        false
    }

    /// Makes room for an element that outranks the boundary bucket.
    fn evict_for_greater(&mut self, boundary_size: usize) {
        let len = self.buckets.len();
        let n = self.config.target();
        if len - boundary_size == n - 1 {
            let _dropped = self.buckets.pop_lowest_bucket();
            trace!(dropped = _dropped, "boundary rank pushed past n");
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_bucket_eviction();
                self.metrics.record_evicted_entries(_dropped as u64);
            }
        } else if len >= self.config.max() {
            self.buckets.pop_lowest_newest();
            trace!(len, "newest boundary tie dropped at ceiling");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entries(1);
        }
    }

    /// Validates bucket bookkeeping, order, the ceiling, and that every
    /// element past rank `n` ties with the `n`th.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;
        if !crate::traits::is_descending(self.buckets.iter()) {
            return Err(InvariantError::new("iteration is not descending"));
        }
        let len = self.buckets.len();
        if len > self.config.max() {
            return Err(InvariantError::new(format!(
                "len {} exceeds max {}",
                len,
                self.config.max()
            )));
        }
        let n = self.config.target();
        if let Some(nth) = self.buckets.iter().nth(n - 1) {
            if self
                .buckets
                .iter()
                .skip(n)
                .any(|extra| extra.cmp(nth) != Ordering::Equal)
            {
                return Err(InvariantError::new(
                    "element beyond rank n does not tie with the nth",
                ));
            }
        }
        Ok(())
    }
}

impl<E: Ord> TopN<E> for TreeTopN<E> {
    type Iter<'a>
        = Iter<'a, E>
    where
        Self: 'a,
        E: 'a;

    fn add(&mut self, elem: E) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        let len = self.buckets.len();
        if len < self.config.target() {
            return self.accept(elem);
        }
        let (ordering, boundary_size) = match self.buckets.lowest() {
            Some((boundary, size)) => (elem.cmp(boundary), size),
            None => return self.accept(elem),
        };
        match ordering {
            Ordering::Greater => {
                self.evict_for_greater(boundary_size);
                self.accept(elem)
            },
            Ordering::Equal if len < self.config.max() => self.accept(elem),
            Ordering::Equal | Ordering::Less => self.reject(),
        }
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.buckets.clear();
    }

    fn target(&self) -> usize {
        self.config.target()
    }

    fn max_len(&self) -> Option<usize> {
        self.config.max_len()
    }

    fn contains(&self, elem: &E) -> bool {
        self.buckets.contains(elem)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.buckets.iter()
    }

    fn first(&self) -> Option<&E> {
        self.buckets.first()
    }

    fn last(&self) -> Option<&E> {
        self.buckets.last()
    }
}

impl<E: Ord> Extend<E> for TreeTopN<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, E: Ord> IntoIterator for &'a TreeTopN<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Equal when `n`, the ceiling, and the stored sequence all match.
impl<E: Ord> PartialEq for TreeTopN<E> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.buckets.iter().eq(other.buckets.iter())
    }
}

impl<E: Ord> Eq for TreeTopN<E> {}

impl<E: fmt::Debug> fmt::Debug for TreeTopN<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeTopN")
            .field("n", &self.config.target())
            .field("max", &self.config.max_len())
            .field("elements", &DebugElements(&self.buckets))
            .finish()
    }
}

struct DebugElements<'a, E>(&'a RankBuckets<E>);

impl<E: fmt::Debug> fmt::Debug for DebugElements<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> TreeTopN<E> {
    pub fn metrics_snapshot(&self) -> TopNMetricsSnapshot {
        self.metrics.snapshot_with(
            self.buckets.len(),
            self.config.target(),
            self.config.max_len(),
        )
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> MetricsSnapshotProvider<TopNMetricsSnapshot> for TreeTopN<E> {
    fn snapshot(&self) -> TopNMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> MetricsReset for TreeTopN<E> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_of(n: usize, input: &[i32]) -> Vec<i32> {
        let mut topn = TreeTopN::new(n);
        topn.add_all(input.iter().copied());
        topn.check_invariants().unwrap();
        topn.to_vec()
    }

    fn lenient_of(n: usize, input: &[i32]) -> Vec<i32> {
        let mut topn = TreeTopN::lenient(n);
        topn.add_all(input.iter().copied());
        topn.check_invariants().unwrap();
        topn.to_vec()
    }

    /// Ranked by `rank` only; `id` tells ties apart.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tagged {
        rank: i32,
        id: u32,
    }

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.rank.cmp(&other.rank)
        }
    }

    fn t(rank: i32, id: u32) -> Tagged {
        Tagged { rank, id }
    }

    fn ids(topn: &TreeTopN<Tagged>) -> Vec<(i32, u32)> {
        topn.iter().map(|e| (e.rank, e.id)).collect()
    }

    // ==============================================
    // Construction
    // ==============================================

    #[test]
    fn constructors_validate_config() {
        assert_eq!(
            TreeTopN::<i32>::try_new(0).unwrap_err(),
            ConfigError::ZeroTarget
        );
        assert_eq!(
            TreeTopN::<i32>::try_with_max(4, 3).unwrap_err(),
            ConfigError::MaxBelowTarget { n: 4, max: 3 }
        );
        assert_eq!(
            TreeTopN::<i32>::try_lenient(0).unwrap_err(),
            ConfigError::ZeroTarget
        );
    }

    #[test]
    #[should_panic(expected = "must be >=")]
    fn with_max_panics_below_target() {
        let _ = TreeTopN::<i32>::with_max(3, 1);
    }

    #[test]
    fn modes_report_capacity() {
        let strict: TreeTopN<i32> = TreeTopN::new(3);
        assert_eq!(strict.tie_mode(), TieMode::Strict);
        assert_eq!(strict.max_len(), Some(3));

        let bounded: TreeTopN<i32> = TreeTopN::with_max(3, 6);
        assert_eq!(bounded.tie_mode(), TieMode::Bounded(6));

        let lenient: TreeTopN<i32> = TreeTopN::lenient(3);
        assert_eq!(lenient.tie_mode(), TieMode::Lenient);
        assert_eq!(lenient.max_len(), None);
        assert_eq!(lenient.target(), 3);

        assert_eq!(
            TreeTopN::<i32>::with_lenient(3, true).config(),
            lenient.config()
        );
        assert_eq!(
            TreeTopN::<i32>::with_lenient(3, false).config(),
            strict.config()
        );
    }

    // ==============================================
    // Strict mode
    // ==============================================

    #[test]
    fn strict_fills_then_keeps_greatest() {
        assert_eq!(strict_of(3, &[1]), vec![1]);
        assert_eq!(strict_of(3, &[1, 3, 2]), vec![3, 2, 1]);
        assert_eq!(strict_of(3, &[1, 3, 2, 4]), vec![4, 3, 2]);
        assert_eq!(strict_of(3, &[7, 1, 6, 2, 5, 3, 4]), vec![7, 6, 5]);
    }

    #[test]
    fn strict_repeats() {
        for input in [
            [1, 1, 2, 2, 3, 3, 4, 4],
            [4, 4, 3, 3, 2, 2, 1, 1],
            [4, 1, 4, 1, 2, 3, 2, 3],
        ] {
            assert_eq!(strict_of(3, &input), vec![4, 4, 3]);
        }
    }

    #[test]
    fn strict_rejects_boundary_tie() {
        let mut topn = TreeTopN::new(2);
        topn.add_all([t(5, 1), t(3, 2)]);
        assert!(!topn.add(t(3, 3)));
        assert_eq!(ids(&topn), vec![(5, 1), (3, 2)]);
    }

    #[test]
    fn strict_evicts_newest_tie_first() {
        let mut topn = TreeTopN::new(3);
        topn.add_all([t(1, 1), t(1, 2), t(1, 3)]);
        assert!(topn.add(t(2, 4)));
        assert_eq!(ids(&topn), vec![(2, 4), (1, 1), (1, 2)]);
        assert!(topn.add(t(2, 5)));
        assert_eq!(ids(&topn), vec![(2, 4), (2, 5), (1, 1)]);
        topn.check_invariants().unwrap();
    }

    // ==============================================
    // Lenient and bounded modes
    // ==============================================

    #[test]
    fn lenient_keeps_boundary_ties() {
        assert_eq!(lenient_of(3, &[1, 1, 2, 2, 3, 3, 4, 4]), vec![4, 4, 3, 3]);
        assert_eq!(lenient_of(3, &[4, 4, 3, 3, 2, 2, 1, 1]), vec![4, 4, 3, 3]);
        assert_eq!(lenient_of(2, &[5, 5, 5, 5]), vec![5, 5, 5, 5]);
    }

    #[test]
    fn lenient_drops_whole_rank_pushed_past_n() {
        let mut topn = TreeTopN::lenient(2);
        topn.add_all([9, 4, 4, 4]);
        assert_eq!(topn.to_vec(), vec![9, 4, 4, 4]);
        assert!(topn.add(6));
        assert_eq!(topn.to_vec(), vec![9, 6]);
        topn.check_invariants().unwrap();
    }

    #[test]
    fn bounded_caps_ties_at_max() {
        let mut topn = TreeTopN::with_max(3, 4);
        topn.add_all([t(7, 1), t(3, 2), t(3, 3), t(3, 4)]);
        assert!(!topn.add(t(3, 5)));
        assert_eq!(topn.len(), 4);

        // rank 3 still covers position 3: drop its newest tie only
        assert!(topn.add(t(5, 6)));
        assert_eq!(ids(&topn), vec![(7, 1), (5, 6), (3, 2), (3, 3)]);
        topn.check_invariants().unwrap();

        // now rank 3 starts at position 3 and is pushed out whole
        assert!(topn.add(t(6, 7)));
        assert_eq!(ids(&topn), vec![(7, 1), (6, 7), (5, 6)]);
        topn.check_invariants().unwrap();
    }

    #[test]
    fn below_boundary_is_rejected_in_every_mode() {
        for mut topn in [
            TreeTopN::new(2),
            TreeTopN::with_max(2, 5),
            TreeTopN::lenient(2),
        ] {
            topn.add_all([8, 6]);
            assert!(!topn.add(1));
            assert_eq!(topn.to_vec(), vec![8, 6]);
        }
    }

    // ==============================================
    // Accessors
    // ==============================================

    #[test]
    fn contains_looks_through_ties() {
        let mut topn = TreeTopN::lenient(1);
        topn.add_all([t(4, 1), t(4, 2), t(4, 3)]);
        assert!(topn.contains(&t(4, 1)));
        assert!(topn.contains(&t(4, 3)));
        assert!(!topn.contains(&t(4, 9)));
        assert!(!topn.contains(&t(5, 1)));
    }

    #[test]
    fn first_last_and_rank_count() {
        let mut topn = TreeTopN::lenient(2);
        assert_eq!(topn.first(), None);
        assert_eq!(topn.last(), None);
        topn.add_all([t(8, 1), t(2, 2), t(2, 3)]);
        assert_eq!(topn.first().map(|e| e.id), Some(1));
        assert_eq!(topn.last().map(|e| e.id), Some(3));
        assert_eq!(topn.rank_count(), 2);
    }

    #[test]
    fn clear_keeps_config() {
        let mut topn = TreeTopN::with_max(2, 3);
        topn.add_all([1, 2, 3]);
        topn.clear();
        assert!(topn.is_empty());
        assert_eq!(topn.max_len(), Some(3));
        topn.extend([5, 5, 5, 5]);
        assert_eq!(topn.to_vec(), vec![5, 5, 5]);
    }

    #[test]
    fn equality_includes_ceiling() {
        let mut a = TreeTopN::new(2);
        let mut b = TreeTopN::new(2);
        let mut c = TreeTopN::with_max(2, 3);
        a.add_all([1, 2]);
        b.add_all([2, 1]);
        c.add_all([1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn into_iterator_and_debug() {
        let mut topn = TreeTopN::new(3);
        topn.add_all([3, 1, 2]);
        let collected: Vec<_> = (&topn).into_iter().copied().collect();
        assert_eq!(collected, vec![3, 2, 1]);
        assert!(format!("{:?}", topn).contains("[3, 2, 1]"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_bucket_evictions() {
        let mut topn = TreeTopN::lenient(2);
        topn.add_all([9, 4, 4, 4, 6, 1]);
        let snap = topn.metrics_snapshot();
        assert_eq!(snap.add_calls, 6);
        assert_eq!(snap.accepted, 5);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.bucket_evictions, 1);
        assert_eq!(snap.evicted_entries, 3);
        assert_eq!(snap.overflow_accepts, 2);
        assert_eq!(snap.max_len, None);

        topn.reset_metrics();
        assert_eq!(topn.snapshot().accepted, 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: invariants hold after every add, for every tie mode
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_always_hold(
            n in 1usize..6,
            extra in 0usize..4,
            lenient in any::<bool>(),
            input in prop::collection::vec(0u8..10, 0..80)
        ) {
            let mut topn = if lenient {
                TreeTopN::lenient(n)
            } else {
                TreeTopN::with_max(n, n + extra)
            };
            for elem in input {
                topn.add(elem);
                prop_assert!(topn.check_invariants().is_ok());
            }
        }

        /// Property: strict mode stores the n greatest of the input
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_strict_keeps_n_greatest(
            n in 1usize..8,
            input in prop::collection::vec(any::<i16>(), 0..64)
        ) {
            let mut topn = TreeTopN::new(n);
            topn.add_all(input.iter().copied());

            let mut expected = input.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(n);
            prop_assert_eq!(topn.to_vec(), expected);
        }

        /// Property: lenient mode stores the n greatest plus all ties of the nth
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_lenient_keeps_all_boundary_ties(
            n in 1usize..6,
            input in prop::collection::vec(0u8..8, 0..64)
        ) {
            let mut topn = TreeTopN::lenient(n);
            topn.add_all(input.iter().copied());

            let mut sorted = input.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            let expected: Vec<u8> = match sorted.get(n - 1).copied() {
                Some(nth) => sorted.into_iter().filter(|v| *v >= nth).collect(),
                None => sorted,
            };
            prop_assert_eq!(topn.to_vec(), expected);
        }
    }
}
