//! Terminal failure taxonomy for a run. None of these are retried beyond
//! the bounded polling already built into capacity expansion.

use wks_host::InventoryError;
use wks_payload::PayloadError;

/// Why a run failed. Converted into `RunOutcome { ok: false, .. }` at the
/// orchestrator boundary; the rendered text names the kind so callers can
/// report it verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// Input is not parseable or is neither accepted payload shape.
    InvalidPayload(String),
    /// Input parsed but yielded zero usable desired items.
    EmptyPayload,
    /// The host exposed zero rows at inventory time.
    NoRowsDetected,
    /// The plan overflows and row adding is disabled.
    InsufficientCapacity { missing: usize },
    /// Rows are still missing after the bounded expansion attempt.
    CapacityStillInsufficient { missing: usize },
    /// Anything else, surfaced with its message text.
    Unexpected(String),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::InvalidPayload(detail) => write!(f, "InvalidPayload: {detail}"),
            RunError::EmptyPayload => write!(
                f,
                "EmptyPayload: no importable rows found; expected rows[] or \
                 days/projects/tasks/hourTypes"
            ),
            RunError::NoRowsDetected => write!(
                f,
                "NoRowsDetected: no entry rows on the host surface; open a \
                 timecard page with Project/Task/Hour-type columns first"
            ),
            RunError::InsufficientCapacity { missing } => write!(
                f,
                "InsufficientCapacity: missing {missing} row(s); enable row \
                 adding or add rows manually first"
            ),
            RunError::CapacityStillInsufficient { missing } => write!(
                f,
                "CapacityStillInsufficient: still missing {missing} row(s) \
                 after requesting growth; add rows manually and rerun"
            ),
            RunError::Unexpected(detail) => write!(f, "UnexpectedFailure: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<PayloadError> for RunError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Invalid(detail) => RunError::InvalidPayload(detail),
            PayloadError::Empty => RunError::EmptyPayload,
        }
    }
}

impl From<InventoryError> for RunError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NoRowsDetected => RunError::NoRowsDetected,
        }
    }
}
