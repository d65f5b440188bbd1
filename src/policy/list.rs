//! Sorted-list top-N for small `n`.
//!
//! Keeps at most `n` elements in a [`SortedList`], greatest at the head. The
//! tail is the admission floor: once full, an element must be strictly
//! greater than the tail to get in, and the tail is evicted to make room.
//!
//! ## Architecture
//!
//! ```text
//!   n = 3, offered: 1, 3, 2, 4
//!
//!   add(1)   head ─► [1] ◄── tail
//!   add(3)   head ─► [3] ◄──► [1] ◄── tail
//!   add(2)   head ─► [3] ◄──► [2] ◄──► [1] ◄── tail         (full)
//!   add(4)   4 > tail(1): evict 1, scan from tail for the slot
//!            head ─► [4] ◄──► [3] ◄──► [2] ◄── tail
//!   add(2)   2 > tail(2)? no → rejected (older tie wins)
//! ```
//!
//! ## Tie Handling
//!
//! Strict only: at most `n` elements are kept. A new element lands *after*
//! every stored element that compares `>=` to it, so among ties the older
//! element iterates first, and a tie with the floor is rejected outright.
//! Use [`TreeTopN`](crate::policy::tree::TreeTopN) when boundary ties must be
//! kept past `n`.
//!
//! ## Exclusion Groups
//!
//! [`ListTopN::with_exclusion`] adds an [`ExclusionStrategy`]: at most one
//! element of each mutually exclusive group is kept. A newcomer that
//! conflicts with a stored rival replaces it only when strictly greater.
//!
//! ## Performance
//!
//! | Operation   | Time | Notes                                    |
//! |-------------|------|------------------------------------------|
//! | `add`       | O(n) | tail compare is O(1); insert scans       |
//! | `contains`  | O(n) | linear `==` scan                         |
//! | `get(i)`    | O(i) | walk from the head                       |
//! | `iter`      | O(n) | double-ended                             |
//!
//! With an exclusion strategy every `add` also scans for a rival, O(n).
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::policy::list::ListTopN;
//! use rankkit::traits::TopN;
//!
//! let mut top = ListTopN::new(3);
//! top.add_all([7, 1, 6, 2, 5, 3, 4]);
//! assert_eq!(top.to_vec(), vec![7, 6, 5]);
//!
//! // Same last digit: only the greatest of each group survives.
//! let mut distinct: ListTopN<u32> =
//!     ListTopN::with_exclusion(3, |a: &u32, b: &u32| a % 10 == b % 10);
//! distinct.add_all([1, 2, 3, 4, 12, 14, 22]);
//! assert_eq!(distinct.to_vec(), vec![22, 14, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::TopNConfig;
use crate::ds::slot_arena::SlotId;
use crate::ds::sorted_list::{Iter, SortedList};
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::traits::{ExclusionStrategy, TopN};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TopNMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TopNMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    ListMetricsRecorder, MetricsReset, MetricsSnapshotProvider, TopNMetricsRecorder,
};

/// Upper bound on nodes reserved up front; larger lists grow on demand.
const MAX_PREALLOC: usize = 1024;

type SharedExclusion<E> = Arc<dyn ExclusionStrategy<E> + Send + Sync>;

/// Strict top-N backed by a descending linked list.
///
/// # Type Parameters
///
/// - `E`: Element type, must be `Ord`
///
/// # Example
///
/// ```
/// use rankkit::policy::list::ListTopN;
/// use rankkit::traits::TopN;
///
/// let mut top = ListTopN::new(3);
/// top.add_all([1, 1, 2, 2, 3, 3, 4, 4]);
/// assert_eq!(top.to_vec(), vec![4, 4, 3]);
/// assert_eq!(top.get(2), Some(&3));
/// ```
///
/// Clones share the exclusion strategy and copy the elements.
#[derive(Clone)]
pub struct ListTopN<E> {
    list: SortedList<E>,
    n: usize,
    exclusion: Option<SharedExclusion<E>>,
    #[cfg(feature = "metrics")]
    metrics: TopNMetrics,
}

impl<E: Ord> ListTopN<E> {
    /// Creates an empty collection keeping the greatest `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero. See [`try_new`](Self::try_new).
    pub fn new(n: usize) -> Self {
        match Self::try_new(n) {
            Ok(topn) => topn,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty collection, returning an error if `n` is zero.
    pub fn try_new(n: usize) -> Result<Self, ConfigError> {
        let config = TopNConfig::strict(n)?;
        debug!(n = config.target(), "list top-n created");
        Ok(Self::from_parts(config.target(), None))
    }

    /// Creates an empty collection that keeps at most one element of each
    /// mutually exclusive group.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero. See [`try_with_exclusion`](Self::try_with_exclusion).
    pub fn with_exclusion<S>(n: usize, strategy: S) -> Self
    where
        S: ExclusionStrategy<E> + Send + Sync + 'static,
    {
        match Self::try_with_exclusion(n, strategy) {
            Ok(topn) => topn,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of [`with_exclusion`](Self::with_exclusion).
    pub fn try_with_exclusion<S>(n: usize, strategy: S) -> Result<Self, ConfigError>
    where
        S: ExclusionStrategy<E> + Send + Sync + 'static,
    {
        let config = TopNConfig::strict(n)?;
        debug!(n = config.target(), "list top-n created with exclusion strategy");
        Ok(Self::from_parts(config.target(), Some(Arc::new(strategy))))
    }

    fn from_parts(n: usize, exclusion: Option<SharedExclusion<E>>) -> Self {
        Self {
            list: SortedList::with_capacity(n.min(MAX_PREALLOC)),
            n,
            exclusion,
            #[cfg(feature = "metrics")]
            metrics: TopNMetrics::default(),
        }
    }

    /// Element at descending rank `index` (0 is the greatest).
    pub fn get(&self, index: usize) -> Option<&E> {
        self.list.nth(index)
    }

    /// Returns `true` if an exclusion strategy is installed.
    pub fn has_exclusion(&self) -> bool {
        self.exclusion.is_some()
    }

    fn reject(&mut self) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_rejected();
        false
    }

    fn insert(&mut self, elem: E) -> bool {
        let (_, _steps) = self.list.insert_desc(elem);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_scan_steps(_steps as u64);
            self.metrics.record_accepted();
        }
        true
    }

    /// Resolves a conflict with a stored rival from the same exclusion group.
    fn challenge(&mut self, rival: SlotId, elem: E) -> bool {
        let rival_holds = self
            .list
            .get(rival)
            .map_or(true, |stored| stored.cmp(&elem) != Ordering::Less);
        if rival_holds {
            trace!("element rejected by exclusive rival");
            #[cfg(feature = "metrics")]
            self.metrics.record_exclusion_reject();
            return self.reject();
        }
        self.list.remove(rival);
        trace!("exclusive rival replaced");
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_exclusion_replace();
            self.metrics.record_evicted_entries(1);
        }
        self.insert(elem)
    }

    /// Validates list links, descending order, and the size bound.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.list.len() > self.n {
            return Err(InvariantError::new(format!(
                "len {} exceeds n {}",
                self.list.len(),
                self.n
            )));
        }
        Ok(())
    }
}

impl<E: Ord> TopN<E> for ListTopN<E> {
    type Iter<'a>
        = Iter<'a, E>
    where
        Self: 'a,
        E: 'a;

    fn add(&mut self, elem: E) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        let rival = match &self.exclusion {
            Some(strategy) => self
                .list
                .find(|stored| strategy.mutually_exclusive(stored, &elem)),
            None => None,
        };
        if let Some(rival) = rival {
            return self.challenge(rival, elem);
        }

        if self.list.len() >= self.n {
            let beats_floor = self
                .list
                .back()
                .map_or(true, |floor| floor.cmp(&elem) == Ordering::Less);
            if !beats_floor {
                return self.reject();
            }
            self.list.pop_back();
            trace!(n = self.n, "evicted list floor");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entries(1);
        }
        self.insert(elem)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.list.clear();
    }

    fn target(&self) -> usize {
        self.n
    }

    fn max_len(&self) -> Option<usize> {
        Some(self.n)
    }

    fn contains(&self, elem: &E) -> bool {
        self.list.iter().any(|stored| stored == elem)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.list.iter()
    }

    fn first(&self) -> Option<&E> {
        self.list.front()
    }

    fn last(&self) -> Option<&E> {
        self.list.back()
    }
}

impl<E: Ord> Extend<E> for ListTopN<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, E: Ord> IntoIterator for &'a ListTopN<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// Equal when both keep the same `n` and hold the same sequence.
impl<E: Ord> PartialEq for ListTopN<E> {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.list.iter().eq(other.list.iter())
    }
}

impl<E: Ord> Eq for ListTopN<E> {}

impl<E: fmt::Debug> fmt::Debug for ListTopN<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListTopN")
            .field("n", &self.n)
            .field("elements", &DebugElements(&self.list))
            .field("exclusion", &self.exclusion.is_some())
            .finish()
    }
}

struct DebugElements<'a, E>(&'a SortedList<E>);

impl<E: fmt::Debug> fmt::Debug for DebugElements<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> ListTopN<E> {
    /// Returns a snapshot of the container's counters.
    pub fn metrics_snapshot(&self) -> TopNMetricsSnapshot {
        self.metrics
            .snapshot_with(self.list.len(), self.n, Some(self.n))
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> MetricsSnapshotProvider<TopNMetricsSnapshot> for ListTopN<E> {
    fn snapshot(&self) -> TopNMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<E: Ord> MetricsReset for ListTopN<E> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: invariants and the size bound hold after every add
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_always_hold(
            n in 1usize..8,
            input in prop::collection::vec(0u8..16, 0..64)
        ) {
            let mut topn = ListTopN::new(n);
            for elem in input {
                topn.add(elem);
                prop_assert!(topn.len() <= n);
                prop_assert!(topn.check_invariants().is_ok());
            }
        }

        /// Property: contents equal the n greatest of the input
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_keeps_n_greatest(
            n in 1usize..8,
            input in prop::collection::vec(any::<i16>(), 0..64)
        ) {
            let mut topn = ListTopN::new(n);
            topn.add_all(input.iter().copied());

            let mut expected = input.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(n);
            prop_assert_eq!(topn.to_vec(), expected);
        }
    }
}
