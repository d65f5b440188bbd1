//! Feature-gated counters for top-N containers (`--features metrics`).
//!
//! Recording, snapshotting and resetting are split into small traits so the
//! containers only ever write counters:
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     TopNMetricsRecorder     │
//!                 │  add / accept / reject      │
//!                 │  evict / clear              │
//!                 └──────────────┬──────────────┘
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!   ┌──────────────────────────┐    ┌──────────────────────────┐
//!   │   ListMetricsRecorder    │    │   TreeMetricsRecorder    │
//!   │ scan steps, exclusions   │    │ bucket evictions, ties   │
//!   └──────────────────────────┘    └──────────────────────────┘
//!
//!   Consumption: MetricsSnapshotProvider<TopNMetricsSnapshot>, MetricsReset
//! ```

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::TopNMetrics;
pub use snapshot::TopNMetricsSnapshot;
pub use traits::{
    ListMetricsRecorder, MetricsReset, MetricsSnapshotProvider, TopNMetricsRecorder,
    TreeMetricsRecorder,
};
