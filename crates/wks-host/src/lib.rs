//! wks-host
//!
//! Capability boundary over the third-party booking surface. This crate owns
//! **only** the row model, the host trait, inventory capture, and the polling
//! primitive. No concrete host adapters, no planning logic, and no write
//! sequencing belong here.
//!
//! All engine access to the host goes through [`HostSurface`] so the
//! reconciler and writer stay unit-testable against an in-memory adapter
//! (see the `wks-grid-mem` crate).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod inventory;
pub mod poll;

pub use inventory::{capture, InventoryError};
pub use poll::{wait_for_row_growth, PollSpec};

/// Number of writable day columns (Monday..Friday). The host grid may render
/// weekend columns as well; the engine never writes them.
pub const DAY_COLUMNS: usize = 5;

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// Addressable fields within one grid row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free-text project label.
    Project,
    /// Free-text task label.
    Task,
    /// Free-text hour-type label.
    HourType,
    /// Day-hours cell, index `0..DAY_COLUMNS` (Monday = 0).
    Day(usize),
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Project => write!(f, "project"),
            FieldKind::Task => write!(f, "task"),
            FieldKind::HourType => write!(f, "hour_type"),
            FieldKind::Day(i) => write!(f, "day{i}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row snapshots
// ---------------------------------------------------------------------------

/// One grid row exactly as the host reports it, before classification.
///
/// `row_index` is the host's ordinal for the row at snapshot time. It is
/// stable within one snapshot but NOT across capacity expansion; callers
/// must re-inventory after the grid grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_index: usize,
    pub project_text: String,
    pub task_text: String,
    pub hour_type_text: String,
    pub day_values: [String; DAY_COLUMNS],
}

/// A [`RawRow`] plus emptiness classification. Rebuilt fresh on every
/// inventory pass and never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub row_index: usize,
    pub project_text: String,
    pub task_text: String,
    pub hour_type_text: String,
    pub day_values: [String; DAY_COLUMNS],
    /// All identity text and all day values blank after trimming.
    pub is_empty: bool,
}

impl GridRow {
    /// Classify a raw snapshot row.
    pub fn classify(raw: RawRow) -> Self {
        let has_identity = !raw.project_text.trim().is_empty()
            || !raw.task_text.trim().is_empty()
            || !raw.hour_type_text.trim().is_empty();
        let has_hours = raw.day_values.iter().any(|v| !v.trim().is_empty());

        Self {
            row_index: raw.row_index,
            project_text: raw.project_text,
            task_text: raw.task_text,
            hour_type_text: raw.hour_type_text,
            day_values: raw.day_values,
            is_empty: !(has_identity || has_hours),
        }
    }

    /// `true` when any day cell holds a non-blank value.
    pub fn has_day_values(&self) -> bool {
        self.day_values.iter().any(|v| !v.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Host capability trait
// ---------------------------------------------------------------------------

/// The full set of capabilities the engine needs from a booking surface.
///
/// Implementations must be object-safe (`Box<dyn HostSurface>` /
/// `&dyn HostSurface`) and `Send + Sync` so a run can cross task boundaries.
///
/// The host is assumed to react asynchronously to each mutation (validation,
/// cascading lookups, row insertion); there is no completion signal to await,
/// so callers pace themselves with [`HostSurface::wait`] between dependent
/// mutations.
#[async_trait]
pub trait HostSurface: Send + Sync {
    /// Snapshot every row the host currently exposes, in host row order.
    /// The count is host-defined and may be zero.
    async fn list_rows(&self) -> Vec<RawRow>;

    /// Write `text` into one field of one row.
    async fn set_field(&self, row_index: usize, field: FieldKind, text: &str);

    /// Locate and invoke the host's add-row control. Adapters locate the
    /// control by a machine-readable action marker first, falling back to
    /// visible-text matching (the control may be labelled in more than one
    /// language). Returns `false` when no control was found; that is not an
    /// error here.
    async fn invoke_add_row(&self) -> bool;

    /// Locate and invoke the host's recalculation control. Same lookup
    /// contract as [`HostSurface::invoke_add_row`].
    async fn invoke_recalculate(&self) -> bool;

    /// Cooperative delay primitive. Test adapters may account the time
    /// without actually sleeping.
    async fn wait(&self, ms: u64);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
