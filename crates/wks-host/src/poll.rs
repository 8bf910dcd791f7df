//! Bounded polling against the host surface.
//!
//! The host gives no completion signal for row insertion, so growth is
//! observed by re-snapshotting the grid between cooperative waits. The loop
//! is attempt-counted (attempts = timeout / interval) rather than clocked,
//! which keeps it deterministic under test adapters whose `wait` does not
//! actually sleep.

use crate::HostSurface;

/// Interval/timeout pair for one bounded poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollSpec {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl PollSpec {
    /// Poll budget used while waiting for the grid to grow after an add-row
    /// invocation: 120ms interval, 12s timeout.
    pub const fn grid_growth() -> Self {
        Self {
            interval_ms: 120,
            timeout_ms: 12_000,
        }
    }

    /// Number of wait/recheck attempts this spec allows.
    pub const fn attempts(&self) -> u64 {
        if self.interval_ms == 0 {
            1
        } else {
            self.timeout_ms / self.interval_ms
        }
    }
}

/// Wait until the host reports strictly more rows than `baseline`.
///
/// Returns `true` as soon as growth is visible; `false` once the attempt
/// budget is exhausted. Timing out is not an error at this layer — the
/// caller detects the resulting deficiency on re-plan.
pub async fn wait_for_row_growth(host: &dyn HostSurface, baseline: usize, poll: PollSpec) -> bool {
    for _ in 0..poll.attempts() {
        if host.list_rows().await.len() > baseline {
            return true;
        }
        host.wait(poll.interval_ms).await;
    }
    host.list_rows().await.len() > baseline
}
