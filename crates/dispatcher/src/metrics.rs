//! Per-sink counters for observability

/// Counters for a single sink
///
/// The dispatcher owns one per sink; `Dispatcher::counters` exposes
/// copies for reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkCounters {
    /// Metric records successfully written
    pub records_logged: u64,
    /// Info lines successfully written
    pub infos_logged: u64,
    /// Failed log/info calls
    pub failure_count: u64,
}

impl SinkCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful `log`
    pub fn inc_records(&mut self) {
        self.records_logged += 1;
    }

    /// Record a successful `info`
    pub fn inc_infos(&mut self) {
        self.infos_logged += 1;
    }

    /// Record a failed call
    pub fn inc_failures(&mut self) {
        self.failure_count += 1;
    }
}
