//! wks-payload
//!
//! Desired-payload normalization. This crate owns the combo identity, the
//! canonical desired line item, the string-equivalence predicate, and the
//! parser that flattens either accepted payload shape into a deduplicated
//! list of [`DesiredItem`]s. It does not touch the host surface.

use serde::{Deserialize, Serialize};

pub mod equiv;
pub mod normalizer;

pub use normalizer::parse_desired_items;

/// Canonical day slots per desired item (Monday..Friday).
pub const DAY_SLOTS: usize = 5;

/// Day slots carried by source payloads; weekend columns are accumulated but
/// never make it into the canonical five-slot form.
pub const SOURCE_DAY_SLOTS: usize = 7;

// ---------------------------------------------------------------------------
// Combo key
// ---------------------------------------------------------------------------

/// Normalized `(project, task, hour-type)` identity used as the merge and
/// matching key. Two source entries with the same key describe the same
/// booking line and are merged by elementwise hour summation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComboKey(String);

impl ComboKey {
    pub fn new(project_name: &str, task_name: &str, hour_type_name: &str) -> Self {
        Self(
            [
                equiv::normalize(project_name),
                equiv::normalize(task_name),
                equiv::normalize(hour_type_name),
            ]
            .join("||"),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Desired item
// ---------------------------------------------------------------------------

/// One normalized desired line item. Constructed once per run by the
/// normalizer and immutable thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesiredItem {
    pub key: ComboKey,
    pub project_name: String,
    pub task_name: String,
    pub hour_type_name: String,
    /// Monday..Friday hours, non-negative, merged across duplicate keys.
    pub hours: [f64; DAY_SLOTS],
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while normalizing a desired payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadError {
    /// Input is not valid JSON or is neither of the two accepted shapes.
    Invalid(String),
    /// Input parsed but yielded zero usable desired items.
    Empty,
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::Invalid(detail) => {
                write!(f, "payload is not an accepted shape: {detail}")
            }
            PayloadError::Empty => write!(
                f,
                "no importable rows found; expected rows[] or days/projects/tasks/hourTypes"
            ),
        }
    }
}

impl std::error::Error for PayloadError {}
