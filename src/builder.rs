//! Unified builder for top-N containers.
//!
//! Picks a backing structure from a [`TopNStrategy`] and hides it behind
//! [`RankedSet`], so callers configure `n` and the tie ceiling once and get
//! a single type regardless of the implementation chosen.
//!
//! ## Example
//!
//! ```rust
//! use rankkit::builder::{TopNBuilder, TopNStrategy};
//! use rankkit::traits::TopN;
//!
//! let mut top = TopNBuilder::new(3).build::<u32>(TopNStrategy::Auto);
//! top.add_all([5, 1, 4, 2, 3]);
//! assert_eq!(top.to_vec(), vec![5, 4, 3]);
//!
//! let mut ties = TopNBuilder::new(2).unbounded().build::<u32>(TopNStrategy::Tree);
//! ties.add_all([9, 7, 7, 7, 1]);
//! assert_eq!(ties.to_vec(), vec![9, 7, 7, 7]);
//! ```

use crate::config::TopNConfig;
use crate::ds::rank_buckets;
use crate::ds::sorted_list;
use crate::error::ConfigError;
use crate::policy::list::ListTopN;
use crate::policy::tree::TreeTopN;
use crate::traits::TopN;

/// Largest strict `n` for which [`TopNStrategy::Auto`] picks the list.
pub const LIST_STRATEGY_MAX_N: usize = 64;

/// Available backing structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopNStrategy {
    /// Sorted linked list; strict mode only.
    List,
    /// Ordered rank buckets; any tie mode.
    Tree,
    /// List for strict `n <= LIST_STRATEGY_MAX_N`, tree otherwise.
    Auto,
}

/// Top-N container produced by [`TopNBuilder`].
#[derive(Debug, Clone)]
pub enum RankedSet<E> {
    List(ListTopN<E>),
    Tree(TreeTopN<E>),
}

impl<E: Ord> PartialEq for RankedSet<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RankedSet::List(a), RankedSet::List(b)) => a == b,
            (RankedSet::Tree(a), RankedSet::Tree(b)) => a == b,
            _ => false,
        }
    }
}

impl<E: Ord> RankedSet<E> {
    /// Strategy that was resolved at build time (never `Auto`).
    pub fn strategy(&self) -> TopNStrategy {
        match self {
            RankedSet::List(_) => TopNStrategy::List,
            RankedSet::Tree(_) => TopNStrategy::Tree,
        }
    }
}

/// Descending iterator over a [`RankedSet`].
#[derive(Clone)]
pub enum RankedIter<'a, E> {
    List(sorted_list::Iter<'a, E>),
    Tree(rank_buckets::Iter<'a, E>),
}

impl<'a, E> Iterator for RankedIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RankedIter::List(it) => it.next(),
            RankedIter::Tree(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            RankedIter::List(it) => it.size_hint(),
            RankedIter::Tree(it) => it.size_hint(),
        }
    }
}

impl<E> ExactSizeIterator for RankedIter<'_, E> {}

impl<E: Ord> TopN<E> for RankedSet<E> {
    type Iter<'a>
        = RankedIter<'a, E>
    where
        Self: 'a,
        E: 'a;

    fn add(&mut self, elem: E) -> bool {
        match self {
            RankedSet::List(list) => list.add(elem),
            RankedSet::Tree(tree) => tree.add(elem),
        }
    }

    fn len(&self) -> usize {
        match self {
            RankedSet::List(list) => list.len(),
            RankedSet::Tree(tree) => tree.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            RankedSet::List(list) => list.clear(),
            RankedSet::Tree(tree) => tree.clear(),
        }
    }

    fn target(&self) -> usize {
        match self {
            RankedSet::List(list) => list.target(),
            RankedSet::Tree(tree) => tree.target(),
        }
    }

    fn max_len(&self) -> Option<usize> {
        match self {
            RankedSet::List(list) => list.max_len(),
            RankedSet::Tree(tree) => tree.max_len(),
        }
    }

    fn contains(&self, elem: &E) -> bool {
        match self {
            RankedSet::List(list) => list.contains(elem),
            RankedSet::Tree(tree) => tree.contains(elem),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        match self {
            RankedSet::List(list) => RankedIter::List(list.iter()),
            RankedSet::Tree(tree) => RankedIter::Tree(tree.iter()),
        }
    }

    fn first(&self) -> Option<&E> {
        match self {
            RankedSet::List(list) => list.first(),
            RankedSet::Tree(tree) => tree.first(),
        }
    }

    fn last(&self) -> Option<&E> {
        match self {
            RankedSet::List(list) => list.last(),
            RankedSet::Tree(tree) => tree.last(),
        }
    }
}

impl<E: Ord> Extend<E> for RankedSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

/// Builder for [`RankedSet`] instances.
///
/// Parameters are validated when building, not when set.
#[derive(Debug, Clone, Copy)]
pub struct TopNBuilder {
    n: usize,
    max: usize,
}

impl TopNBuilder {
    /// Starts a strict configuration keeping the top `n`.
    pub fn new(n: usize) -> Self {
        Self { n, max: n }
    }

    /// Keeps boundary ties up to `max` elements in total.
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Keeps every element tied with the `n`th.
    pub fn unbounded(mut self) -> Self {
        self.max = usize::MAX;
        self
    }

    /// `true` is [`unbounded`](Self::unbounded), `false` resets to strict.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.max = if lenient { usize::MAX } else { self.n };
        self
    }

    /// Validates the parameters and builds the container.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroTarget`] / [`ConfigError::MaxBelowTarget`] for
    ///   invalid sizes
    /// - [`ConfigError::ListRequiresStrict`] when [`TopNStrategy::List`] is
    ///   combined with a ceiling above `n`
    pub fn try_build<E: Ord>(self, strategy: TopNStrategy) -> Result<RankedSet<E>, ConfigError> {
        let config = TopNConfig::new(self.n, self.max)?;
        let use_list = match strategy {
            TopNStrategy::List if config.is_strict() => true,
            TopNStrategy::List => {
                return Err(ConfigError::ListRequiresStrict {
                    n: config.target(),
                    max: config.max(),
                })
            },
            TopNStrategy::Tree => false,
            TopNStrategy::Auto => config.is_strict() && config.target() <= LIST_STRATEGY_MAX_N,
        };
        if use_list {
            ListTopN::try_new(config.target()).map(RankedSet::List)
        } else {
            Ok(RankedSet::Tree(TreeTopN::from_config(config)))
        }
    }

    /// Builds the container.
    ///
    /// # Panics
    ///
    /// Panics on any error [`try_build`](Self::try_build) would return.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rankkit::builder::{TopNBuilder, TopNStrategy};
    ///
    /// let small = TopNBuilder::new(10).build::<u64>(TopNStrategy::Auto);
    /// assert_eq!(small.strategy(), TopNStrategy::List);
    ///
    /// let large = TopNBuilder::new(1_000).build::<u64>(TopNStrategy::Auto);
    /// assert_eq!(large.strategy(), TopNStrategy::Tree);
    ///
    /// let bounded = TopNBuilder::new(10).max(20).build::<u64>(TopNStrategy::Auto);
    /// assert_eq!(bounded.strategy(), TopNStrategy::Tree);
    /// ```
    pub fn build<E: Ord>(self, strategy: TopNStrategy) -> RankedSet<E> {
        match self.try_build(strategy) {
            Ok(set) => set,
            Err(e) => panic!("{}", e),
        }
    }
}
