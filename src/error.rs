//! Error types for the rankkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when capacity parameters are invalid (zero
//!   target, a ceiling below the target, or ties requested from the list
//!   strategy). Reported only at construction;
//!   `add` never fails.
//! - [`InvariantError`]: Returned by the debug-only `check_invariants`
//!   methods when a container's ordering or bookkeeping is inconsistent.
//!
//! ## Example Usage
//!
//! ```
//! use rankkit::error::ConfigError;
//! use rankkit::policy::tree::TreeTopN;
//!
//! let topn: Result<TreeTopN<u32>, ConfigError> = TreeTopN::try_with_max(3, 10);
//! assert!(topn.is_ok());
//!
//! let bad = TreeTopN::<u32>::try_with_max(3, 2);
//! assert_eq!(bad.unwrap_err(), ConfigError::MaxBelowTarget { n: 3, max: 2 });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when top-N capacity parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`TreeTopN::try_with_max`](crate::policy::tree::TreeTopN::try_with_max)
/// and [`TopNBuilder::try_build`](crate::builder::TopNBuilder::try_build).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The target size `n` was zero.
    ZeroTarget,
    /// The ceiling `max` was lower than the target size `n`.
    MaxBelowTarget { n: usize, max: usize },
    /// The list strategy was asked to keep ties beyond `n`.
    ListRequiresStrict { n: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTarget => f.write_str("target size n must be greater than zero"),
            ConfigError::MaxBelowTarget { n, max } => {
                write!(f, "max ({}) must be >= target size n ({})", max, n)
            },
            ConfigError::ListRequiresStrict { n, max } => write!(
                f,
                "list strategy keeps exactly n elements, but max ({}) != n ({})",
                max, n
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a container's internal invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
