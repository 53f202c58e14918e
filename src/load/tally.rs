use serde::Serialize;

use super::fetch::Outcome;

/// Per-category outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub success: u64,
    pub conn_err: u64,
    pub timeout: u64,
    pub generic_err: u64,
}

/// One worker's tally; its counters sum to the worker's batch size.
pub type BatchResult = OutcomeCounts;

impl OutcomeCounts {
    /// A batch whose worker died before reporting: every request is generic.
    #[must_use]
    pub const fn faulted(size: u64) -> Self {
        Self {
            success: 0,
            conn_err: 0,
            timeout: 0,
            generic_err: size,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Success => &mut self.success,
            Outcome::ConnectionError => &mut self.conn_err,
            Outcome::Timeout => &mut self.timeout,
            Outcome::GenericError => &mut self.generic_err,
        };
        *slot = slot.saturating_add(1);
    }

    /// Folds any requests not yet accounted for into `generic_err`.
    pub fn settle(&mut self, expected: u64) {
        let missing = expected.saturating_sub(self.total());
        self.generic_err = self.generic_err.saturating_add(missing);
    }

    pub fn merge(&mut self, other: &Self) {
        self.success = self.success.saturating_add(other.success);
        self.conn_err = self.conn_err.saturating_add(other.conn_err);
        self.timeout = self.timeout.saturating_add(other.timeout);
        self.generic_err = self.generic_err.saturating_add(other.generic_err);
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success
            .saturating_add(self.conn_err)
            .saturating_add(self.timeout)
            .saturating_add(self.generic_err)
    }
}

/// Whole-run aggregate, produced once every worker has reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub iterations: u64,
    pub quantum: u64,
    pub worker_count: u64,
    /// Per-worker results in the order they were read off the queue; empty
    /// unless worker stats were requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workers: Vec<BatchResult>,
    pub totals: OutcomeCounts,
}
