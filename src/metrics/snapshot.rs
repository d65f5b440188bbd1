/// Point-in-time copy of a container's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TopNMetricsSnapshot {
    pub add_calls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub insert_scan_steps: u64,
    pub exclusion_replacements: u64,
    pub exclusion_rejections: u64,

    pub bucket_evictions: u64,
    pub overflow_accepts: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub target: usize,
    pub max_len: Option<usize>,
}

impl TopNMetricsSnapshot {
    /// Fraction of offered elements that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.add_calls == 0 {
            0.0
        } else {
            self.accepted as f64 / self.add_calls as f64
        }
    }
}
