use crate::metrics::snapshot::TopNMetricsSnapshot;
use crate::metrics::traits::{ListMetricsRecorder, TopNMetricsRecorder, TreeMetricsRecorder};

// ---------------------------------------------------------------------------
// TopNMetrics
// ---------------------------------------------------------------------------

/// Plain counters; both containers embed one.
#[derive(Debug, Default, Clone)]
pub struct TopNMetrics {
    pub add_calls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    // list
    pub insert_scan_steps: u64,
    pub exclusion_replacements: u64,
    pub exclusion_rejections: u64,

    // tree
    pub bucket_evictions: u64,
    pub overflow_accepts: u64,
}

impl TopNMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copies the counters and attaches the container gauges.
    pub fn snapshot_with(
        &self,
        len: usize,
        target: usize,
        max_len: Option<usize>,
    ) -> TopNMetricsSnapshot {
        TopNMetricsSnapshot {
            add_calls: self.add_calls,
            accepted: self.accepted,
            rejected: self.rejected,
            evicted_entries: self.evicted_entries,
            clear_calls: self.clear_calls,
            insert_scan_steps: self.insert_scan_steps,
            exclusion_replacements: self.exclusion_replacements,
            exclusion_rejections: self.exclusion_rejections,
            bucket_evictions: self.bucket_evictions,
            overflow_accepts: self.overflow_accepts,
            len,
            target,
            max_len,
        }
    }
}

impl TopNMetricsRecorder for TopNMetrics {
    fn record_add_call(&mut self) {
        self.add_calls += 1;
    }
    fn record_accepted(&mut self) {
        self.accepted += 1;
    }
    fn record_rejected(&mut self) {
        self.rejected += 1;
    }
    fn record_evicted_entries(&mut self, count: u64) {
        self.evicted_entries += count;
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl ListMetricsRecorder for TopNMetrics {
    fn record_scan_steps(&mut self, steps: u64) {
        self.insert_scan_steps += steps;
    }
    fn record_exclusion_replace(&mut self) {
        self.exclusion_replacements += 1;
    }
    fn record_exclusion_reject(&mut self) {
        self.exclusion_rejections += 1;
    }
}

impl TreeMetricsRecorder for TopNMetrics {
    fn record_bucket_eviction(&mut self) {
        self.bucket_evictions += 1;
    }
    fn record_overflow_accept(&mut self) {
        self.overflow_accepts += 1;
    }
}
