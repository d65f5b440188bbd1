//! rankkit: bounded ranked collections that keep the greatest `n` elements.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
