//! Rank buckets: an ordered map from rank value to its tied elements.
//!
//! Groups elements that compare `Equal` into one bucket per distinct rank.
//! Within a bucket arrival order is preserved: the first element to reach a
//! rank becomes the bucket's key and later ties queue up behind it.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │              buckets: BTreeMap<E, VecDeque<E>>                    │
//! │                                                                   │
//! │   key (first arrival)      later ties (arrival order)             │
//! │   ┌──────────┐            ┌──────────────────────────────┐        │
//! │   │    9     │ ─────────► │ (empty)                      │  high  │
//! │   │    7     │ ─────────► │ 7' ─ 7''                     │        │
//! │   │    4     │ ─────────► │ 4'                           │  low   │
//! │   └──────────┘            └──────────────────────────────┘        │
//! │                                                                   │
//! │   len = 6 (keys + queued ties)                                    │
//! └───────────────────────────────────────────────────────────────────┘
//!
//!   iter():  9, 7, 7', 7'', 4, 4'         (highest bucket first)
//!   pop_lowest_newest():  4'  then  4     (newest tie first)
//!   pop_lowest_bucket():  4, 4'           (whole rank at once)
//! ```
//!
//! ## Operations
//!
//! | Operation             | Time        | Notes                              |
//! |-----------------------|-------------|------------------------------------|
//! | `insert`              | O(log b)    | b = number of distinct ranks       |
//! | `lowest`              | O(log b)    | key and bucket size                |
//! | `pop_lowest_newest`   | O(log b)    | newest tie of the lowest rank      |
//! | `pop_lowest_bucket`   | O(log b + k)| k = ties dropped                   |
//! | `contains`            | O(log b + k)| floor bucket, then its queue       |
//! | `iter`                | O(len)      | descending, ties oldest-first      |
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::ds::RankBuckets;
//!
//! let mut buckets = RankBuckets::new();
//! buckets.insert(3);
//! buckets.insert(5);
//! buckets.insert(3);
//!
//! assert_eq!(buckets.len(), 3);
//! assert_eq!(buckets.lowest(), Some((&3, 2)));
//! assert_eq!(buckets.iter().copied().collect::<Vec<_>>(), vec![5, 3, 3]);
//!
//! assert_eq!(buckets.pop_lowest_bucket(), 2);
//! assert_eq!(buckets.len(), 1);
//! ```

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::vec_deque;
use std::collections::{BTreeMap, VecDeque};
use std::iter::{FusedIterator, Rev};

#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

/// Ordered rank buckets with FIFO tie queues.
#[derive(Debug, Clone)]
pub struct RankBuckets<E> {
    buckets: BTreeMap<E, VecDeque<E>>,
    len: usize,
}

impl<E> RankBuckets<E> {
    /// Total number of elements across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct ranks.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Descending iterator: each bucket yields its key, then its ties.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            buckets: self.buckets.iter().rev(),
            ties: None,
            remaining: self.len,
        }
    }
}

impl<E: Ord> RankBuckets<E> {
    /// Creates an empty bucket map.
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Inserts `elem`; returns `true` if it opened a new rank.
    pub fn insert(&mut self, elem: E) -> bool {
        self.len += 1;
        match self.buckets.get_mut(&elem) {
            Some(ties) => {
                ties.push_back(elem);
                false
            },
            None => {
                self.buckets.insert(elem, VecDeque::new());
                true
            },
        }
    }

    /// Greatest element (the key of the highest bucket).
    pub fn first(&self) -> Option<&E> {
        self.buckets.last_key_value().map(|(key, _)| key)
    }

    /// Last element in iteration order: the newest tie of the lowest rank.
    pub fn last(&self) -> Option<&E> {
        let (key, ties) = self.buckets.first_key_value()?;
        Some(ties.back().unwrap_or(key))
    }

    /// Key of the lowest rank and the number of elements holding it.
    pub fn lowest(&self) -> Option<(&E, usize)> {
        self.buckets
            .first_key_value()
            .map(|(key, ties)| (key, ties.len() + 1))
    }

    /// Drops the whole lowest rank; returns how many elements were removed.
    pub fn pop_lowest_bucket(&mut self) -> usize {
        match self.buckets.pop_first() {
            Some((_, ties)) => {
                let removed = ties.len() + 1;
                self.len -= removed;
                removed
            },
            None => 0,
        }
    }

    /// Removes the newest element of the lowest rank.
    ///
    /// The bucket key goes last, taking the bucket with it.
    pub fn pop_lowest_newest(&mut self) -> Option<E> {
        let mut entry = self.buckets.first_entry()?;
        let newest_tie = entry.get_mut().pop_back();
        let evicted = match newest_tie {
            Some(tie) => tie,
            None => entry.remove_entry().0,
        };
        self.len -= 1;
        Some(evicted)
    }

    /// Returns `true` if some stored element is `==` to `elem`.
    ///
    /// Looks only in the floor bucket (greatest key `<= elem`), so an order
    /// that ties unequal values is handled by scanning that bucket's ties.
    pub fn contains(&self, elem: &E) -> bool {
        match self.buckets.range::<E, _>(..=elem).next_back() {
            Some((key, ties)) => {
                key == elem || (key.cmp(elem) == Ordering::Equal && ties.iter().any(|t| t == elem))
            },
            None => false,
        }
    }

    /// Validates the counter and that every queued tie matches its key's rank.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut counted = 0usize;
        for (key, ties) in &self.buckets {
            for tie in ties {
                if tie.cmp(key) != Ordering::Equal {
                    return Err(InvariantError::new(
                        "bucket holds an element that does not tie with its key",
                    ));
                }
            }
            counted += ties.len() + 1;
        }
        if counted != self.len {
            return Err(InvariantError::new(format!(
                "buckets hold {} elements but len = {}",
                counted, self.len
            )));
        }
        Ok(())
    }
}

impl<E: Ord> Default for RankBuckets<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Descending iterator over [`RankBuckets`].
pub struct Iter<'a, E> {
    buckets: Rev<btree_map::Iter<'a, E, VecDeque<E>>>,
    ties: Option<vec_deque::Iter<'a, E>>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tie) = self.ties.as_mut().and_then(Iterator::next) {
            self.remaining -= 1;
            return Some(tie);
        }
        let (key, ties) = self.buckets.next()?;
        self.ties = Some(ties.iter());
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            ties: self.ties.clone(),
            remaining: self.remaining,
        }
    }
}
