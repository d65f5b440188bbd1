//! Validated capacity parameters shared by every top-N container.
//!
//! A [`TopNConfig`] pairs the target size `n` with the hard ceiling `max`.
//! The ceiling only controls how many elements *tied* with the `n`th one may
//! be kept on top of the first `n`:
//!
//! | `max`            | [`TieMode`]          | Behaviour at the boundary            |
//! |------------------|----------------------|--------------------------------------|
//! | `n`              | `Strict`             | later ties are rejected              |
//! | `n < max < ∞`    | `Bounded(max)`       | ties kept until `max` elements       |
//! | unbounded        | `Lenient`            | every tie at the boundary is kept    |
//!
//! An unbounded ceiling is stored as `usize::MAX`.

use crate::error::ConfigError;

/// How elements tied at the `n`th rank are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieMode {
    /// No more than `n` elements are ever kept.
    Strict,
    /// Ties at the boundary are kept up to the given total.
    Bounded(usize),
    /// Ties at the boundary are always kept.
    Lenient,
}

/// Target size and ceiling of a top-N container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopNConfig {
    n: usize,
    max: usize,
}

impl TopNConfig {
    /// Strict configuration: keeps exactly the top `n`.
    pub fn strict(n: usize) -> Result<Self, ConfigError> {
        Self::new(n, n)
    }

    /// Keeps the top `n`, plus boundary ties up to `max` elements in total.
    pub fn new(n: usize, max: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        if max < n {
            return Err(ConfigError::MaxBelowTarget { n, max });
        }
        Ok(Self { n, max })
    }

    /// Keeps the top `n` and every element tied with the `n`th.
    pub fn unbounded(n: usize) -> Result<Self, ConfigError> {
        Self::new(n, usize::MAX)
    }

    /// Boolean form of the tie policy: `true` is [`unbounded`](Self::unbounded),
    /// `false` is [`strict`](Self::strict).
    pub fn lenient(n: usize, lenient: bool) -> Result<Self, ConfigError> {
        if lenient {
            Self::unbounded(n)
        } else {
            Self::strict(n)
        }
    }

    /// Target size `n`.
    #[inline]
    pub fn target(&self) -> usize {
        self.n
    }

    /// Ceiling as a raw count (`usize::MAX` when unbounded).
    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Ceiling, or `None` when unbounded.
    #[inline]
    pub fn max_len(&self) -> Option<usize> {
        (self.max != usize::MAX).then_some(self.max)
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.max == self.n
    }

    pub fn tie_mode(&self) -> TieMode {
        if self.max == self.n {
            TieMode::Strict
        } else if self.max == usize::MAX {
            TieMode::Lenient
        } else {
            TieMode::Bounded(self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_config_has_max_equal_to_target() {
        let cfg = TopNConfig::strict(4).unwrap();
        assert_eq!(cfg.target(), 4);
        assert_eq!(cfg.max(), 4);
        assert_eq!(cfg.max_len(), Some(4));
        assert!(cfg.is_strict());
        assert_eq!(cfg.tie_mode(), TieMode::Strict);
    }

    #[test]
    fn zero_target_is_rejected() {
        assert_eq!(TopNConfig::strict(0), Err(ConfigError::ZeroTarget));
        assert_eq!(TopNConfig::unbounded(0), Err(ConfigError::ZeroTarget));
    }

    #[test]
    fn max_below_target_is_rejected() {
        assert_eq!(
            TopNConfig::new(5, 4),
            Err(ConfigError::MaxBelowTarget { n: 5, max: 4 })
        );
    }

    #[test]
    fn bounded_and_unbounded_modes() {
        let bounded = TopNConfig::new(3, 7).unwrap();
        assert_eq!(bounded.tie_mode(), TieMode::Bounded(7));
        assert!(!bounded.is_strict());

        let lenient = TopNConfig::unbounded(3).unwrap();
        assert_eq!(lenient.tie_mode(), TieMode::Lenient);
        assert_eq!(lenient.max_len(), None);
    }

    #[test]
    fn boolean_lenient_is_an_alias() {
        assert_eq!(
            TopNConfig::lenient(3, true).unwrap(),
            TopNConfig::unbounded(3).unwrap()
        );
        assert_eq!(
            TopNConfig::lenient(3, false).unwrap(),
            TopNConfig::strict(3).unwrap()
        );
    }
}
