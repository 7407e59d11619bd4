use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;

/// Accumulated statistics for one operation identity within the current
/// reporting interval. Cells are immutable values: a merge builds a new cell
/// and swaps it in wholesale, so all four fields are mutually consistent in
/// any read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatCell {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub cost: Duration,
}

impl StatCell {
    fn absorb(&self, outcome: &Outcome) -> StatCell {
        StatCell {
            total: self.total + 1,
            success: self.success + u64::from(outcome.succeeded),
            failed: self.failed + u64::from(!outcome.succeeded),
            cost: self.cost + outcome.elapsed,
        }
    }

    /// Mean latency in milliseconds; 0 when nothing was recorded.
    pub fn avg_latency_ms(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.cost.as_secs_f64() * 1_000.0 / self.total as f64
    }

    /// Failure percentage; 0 when nothing was recorded.
    pub fn fail_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.failed as f64 / self.total as f64
    }
}

/// The result of one completed invocation.
#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub succeeded: bool,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn success(elapsed: Duration) -> Self {
        Self {
            succeeded: true,
            elapsed,
        }
    }

    pub fn failure(elapsed: Duration) -> Self {
        Self {
            succeeded: false,
            elapsed,
        }
    }
}

/// Atomically swappable slot holding one [`StatCell`]. The unit of mutation
/// for the whole aggregator: writers race through `apply`, the reporter
/// claims an interval's worth of data through `take`.
#[derive(Debug)]
pub struct StatHolder {
    cell: ArcSwap<StatCell>,
}

impl Default for StatHolder {
    fn default() -> Self {
        Self {
            cell: ArcSwap::from_pointee(StatCell::default()),
        }
    }
}

impl StatHolder {
    /// Fold one outcome into the cell. Optimistic read-modify-swap loop:
    /// a concurrent writer makes the swap fail, and the merge is retried
    /// against the freshly published cell. Never blocks, never drops an
    /// outcome.
    pub fn apply(&self, outcome: &Outcome) {
        self.cell.rcu(|cell| cell.absorb(outcome));
    }

    /// Snapshot-and-reset: atomically exchange the cell for a zero cell and
    /// return what was captured. A merge racing this swap lands either in
    /// the returned cell or in the next interval's zero baseline, never in
    /// both and never nowhere.
    pub fn take(&self) -> StatCell {
        *self.cell.swap(Arc::new(StatCell::default()))
    }

    /// Current value without resetting.
    pub fn peek(&self) -> StatCell {
        **self.cell.load()
    }
}
