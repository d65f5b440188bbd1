//! # Top-N Capability Traits
//!
//! This module defines the contract shared by every bounded ranked
//! collection, so callers can depend on the capability instead of on a
//! particular backing structure.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌─────────────────────────────────────────┐
//!                      │               TopN<E: Ord>              │
//!                      │                                         │
//!                      │  add(&mut, E) → bool                    │
//!                      │  add_all(&mut, impl IntoIterator) → bool│
//!                      │  contains(&, &E) → bool                 │
//!                      │  iter(&) → Iter<'_>   (descending)      │
//!                      │  first / last / len / clear             │
//!                      │  target / max_len                       │
//!                      │  to_vec / to_vec_into  (E: Clone)       │
//!                      └──────────────────┬──────────────────────┘
//!                                         │
//!            ┌────────────────────────────┼────────────────────────────┐
//!            ▼                            ▼                            ▼
//!   ┌──────────────────┐        ┌──────────────────┐        ┌──────────────────┐
//!   │   ListTopN<E>    │        │   TreeTopN<E>    │        │   RankedSet<E>   │
//!   │  sorted list     │        │  rank buckets    │        │  builder output  │
//!   │  strict, small N │        │  tie-aware, big N│        │  (either one)    │
//!   └──────────────────┘        └──────────────────┘        └──────────────────┘
//! ```
//!
//! ## No Arbitrary Removal
//!
//! ```text
//!   top-3 of a stream:   [9] ─ [7] ─ [5]      (5 is the admission floor)
//!
//!   If remove(&7) existed:
//!                        [9] ─ [5]
//!
//!   The container would now under-report: an element 6 that arrived
//!   earlier and was rejected belongs in the top 3, but is gone forever.
//! ```
//!
//! The trait therefore only grows (`add`) or resets (`clear`); eviction is an
//! internal decision made inside `add`.
//!
//! ## Ordering Contract
//!
//! - Iteration is non-increasing under `Ord`.
//! - Elements comparing `Equal` iterate in arrival order and the newest is
//!   evicted first ("earliest is greatest").
//! - `cmp` must be a total order and must not panic. A panicking `cmp`
//!   unwinds through `add` and leaves the container contents unspecified.
//!
//! ## Thread Safety
//!
//! Implementations are not internally synchronized. They are `Send`/`Sync`
//! when `E` is, so they can be placed behind a caller-owned lock.

use std::cmp::Ordering;

/// Bounded ranked collection that retains the greatest elements it is offered.
///
/// # Example
///
/// ```
/// use rankkit::traits::TopN;
/// use rankkit::policy::list::ListTopN;
/// use rankkit::policy::tree::TreeTopN;
///
/// fn best_three<T: TopN<u32>>(mut topn: T, scores: &[u32]) -> Vec<u32> {
///     topn.add_all(scores.iter().copied());
///     topn.to_vec()
/// }
///
/// assert_eq!(best_three(ListTopN::new(3), &[1, 3, 2, 4]), vec![4, 3, 2]);
/// assert_eq!(best_three(TreeTopN::new(3), &[1, 3, 2, 4]), vec![4, 3, 2]);
/// ```
pub trait TopN<E: Ord> {
    /// Descending iterator over stored elements.
    type Iter<'a>: Iterator<Item = &'a E>
    where
        Self: 'a,
        E: 'a;

    /// Offers `elem`; returns `true` if the contents changed.
    ///
    /// Rejection (`false`) is the only failure signal; `add` never errors.
    fn add(&mut self, elem: E) -> bool;

    /// Offers every element in order; returns `true` if any `add` did.
    ///
    /// Order matters: among ties, earlier elements outrank later ones.
    fn add_all<I>(&mut self, elems: I) -> bool
    where
        I: IntoIterator<Item = E>,
        Self: Sized,
    {
        let mut changed = false;
        for elem in elems {
            changed |= self.add(elem);
        }
        changed
    }

    /// Number of stored elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element; `target` and `max_len` are kept.
    fn clear(&mut self);

    /// Number of top-ranked slots always retained (`n`).
    fn target(&self) -> usize;

    /// Hard ceiling on stored elements, `None` when unbounded.
    fn max_len(&self) -> Option<usize>;

    /// Returns `true` if some stored element is `==` to `elem`.
    fn contains(&self, elem: &E) -> bool;

    /// Read-only descending traversal; each call starts a fresh pass.
    fn iter(&self) -> Self::Iter<'_>;

    /// Greatest stored element.
    fn first(&self) -> Option<&E> {
        self.iter().next()
    }

    /// Last element in iteration order (the next eviction candidate).
    fn last(&self) -> Option<&E>;

    /// Clones the contents, greatest first.
    fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Clears `out` and fills it with the contents, reusing its allocation.
    fn to_vec_into(&self, out: &mut Vec<E>)
    where
        E: Clone,
    {
        out.clear();
        out.reserve(self.len());
        out.extend(self.iter().cloned());
    }
}

/// Decides whether two elements may not be kept together.
///
/// Used by [`ListTopN::with_exclusion`](crate::policy::list::ListTopN::with_exclusion):
/// at most one element of each mutually exclusive group survives, the
/// greater one (the older one on ties). The relation should be symmetric and
/// transitive, otherwise more than one element of a group may end up stored.
///
/// Any `Fn(&E, &E) -> bool` closure implements this trait.
pub trait ExclusionStrategy<E> {
    fn mutually_exclusive(&self, a: &E, b: &E) -> bool;
}

impl<E, F> ExclusionStrategy<E> for F
where
    F: Fn(&E, &E) -> bool,
{
    #[inline]
    fn mutually_exclusive(&self, a: &E, b: &E) -> bool {
        self(a, b)
    }
}

/// Returns `true` if `iter` is non-increasing under `Ord`.
///
/// Shared by invariant checks and tests.
pub fn is_descending<'a, E, I>(iter: I) -> bool
where
    E: Ord + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut iter = iter.into_iter();
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for elem in iter {
        if prev.cmp(elem) == Ordering::Less {
            return false;
        }
        prev = elem;
    }
    true
}
