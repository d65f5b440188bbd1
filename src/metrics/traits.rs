//! # Metrics Trait Hierarchy
//!
//! Recorders only write counters; providers only read them. A container
//! embeds one [`TopNMetrics`](super::TopNMetrics) value and calls the
//! recorder methods from `add`/`clear`.

/// Counters common to every top-N container.
pub trait TopNMetricsRecorder {
    fn record_add_call(&mut self);
    fn record_accepted(&mut self);
    fn record_rejected(&mut self);
    fn record_evicted_entries(&mut self, count: u64);
    fn record_clear(&mut self);
}

/// Counters specific to the sorted-list container.
pub trait ListMetricsRecorder: TopNMetricsRecorder {
    /// Elements stepped over while looking for the insertion point.
    fn record_scan_steps(&mut self, steps: u64);
    /// An exclusive rival was replaced by a greater element.
    fn record_exclusion_replace(&mut self);
    /// An element lost against an exclusive rival already stored.
    fn record_exclusion_reject(&mut self);
}

/// Counters specific to the rank-bucket container.
pub trait TreeMetricsRecorder: TopNMetricsRecorder {
    /// The whole lowest rank was dropped in one step.
    fn record_bucket_eviction(&mut self);
    /// An element was accepted past `n` because it ties the boundary or
    /// room remained under `max`.
    fn record_overflow_accept(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
