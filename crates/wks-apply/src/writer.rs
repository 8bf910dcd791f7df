//! Applies a reconciliation plan to the host surface.
//!
//! Identity fields are written strictly in project -> task -> hour-type
//! order, with a settle delay after each write: the host runs its own
//! field-dependent cascades (task lookups depend on the project, hour-type
//! lookups on the task) and exposes no completion signal, so wall-clock
//! settling is the only pacing available.

use tracing::debug;

use wks_host::{FieldKind, GridRow, HostSurface, DAY_COLUMNS};
use wks_plan::{Assignment, ReconciliationPlan};

/// Settle delay after writing the project field.
pub const SETTLE_PROJECT_MS: u64 = 180;
/// Settle delay after writing the task field.
pub const SETTLE_TASK_MS: u64 = 180;
/// Settle delay after writing the hour-type field.
pub const SETTLE_HOUR_TYPE_MS: u64 = 120;
/// Settle delay after invoking host recalculation.
pub const SETTLE_RECALCULATE_MS: u64 = 350;

/// Desired hours with magnitude below this are "no value".
const ZERO_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Hour formatting
// ---------------------------------------------------------------------------

/// Render one desired hour value as grid cell text.
///
/// Rounds to 2 decimal places first; magnitudes below 1e-6 render as the
/// empty string; integers render plain; anything else drops trailing zeros
/// and a trailing decimal separator.
pub fn format_hour_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.abs() < ZERO_EPSILON {
        return String::new();
    }
    if rounded == rounded.trunc() {
        return format!("{}", rounded as i64);
    }

    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ---------------------------------------------------------------------------
// Assignment writes
// ---------------------------------------------------------------------------

/// Write every assignment in the plan: identity fields first, then the five
/// day cells under the overwrite policy.
pub async fn apply_assignments(host: &dyn HostSurface, plan: &ReconciliationPlan, overwrite: bool) {
    for assignment in &plan.assignments {
        write_assignment(host, assignment, overwrite).await;
    }
}

/// Write one assignment into its row.
pub async fn write_assignment(host: &dyn HostSurface, assignment: &Assignment, overwrite: bool) {
    let row = &assignment.row;
    let desired = &assignment.desired;
    debug!(
        row_index = row.row_index,
        kind = ?assignment.kind,
        project = %desired.project_name,
        "writing assignment"
    );

    set_identity_fields(host, assignment).await;

    for day_index in 0..DAY_COLUMNS {
        let hour = desired.hours[day_index];
        if !overwrite && hour.abs() < ZERO_EPSILON {
            // Preserve mode: zero desired hours leave the cell alone.
            continue;
        }
        host.set_field(row.row_index, FieldKind::Day(day_index), &format_hour_value(hour))
            .await;
    }
}

/// Set identity fields in dependency order, comparing by plain string
/// inequality on trimmed text (not equivalence), with a settle delay after
/// each write so the host's cascading lookups resolve before the next
/// dependent field.
async fn set_identity_fields(host: &dyn HostSurface, assignment: &Assignment) {
    let row = &assignment.row;
    let desired = &assignment.desired;

    if row.project_text.trim() != desired.project_name {
        host.set_field(row.row_index, FieldKind::Project, &desired.project_name)
            .await;
        host.wait(SETTLE_PROJECT_MS).await;
    }

    if row.task_text.trim() != desired.task_name {
        host.set_field(row.row_index, FieldKind::Task, &desired.task_name)
            .await;
        host.wait(SETTLE_TASK_MS).await;
    }

    if row.hour_type_text.trim() != desired.hour_type_name {
        host.set_field(row.row_index, FieldKind::HourType, &desired.hour_type_name)
            .await;
        host.wait(SETTLE_HOUR_TYPE_MS).await;
    }
}

// ---------------------------------------------------------------------------
// Untouched-row clearing
// ---------------------------------------------------------------------------

/// Blank all day cells of every untouched row that still carries hours.
/// Identity fields are left as-is. Returns how many rows were cleared.
pub async fn clear_untouched(host: &dyn HostSurface, untouched_rows: &[GridRow]) -> usize {
    let mut cleared = 0;
    for row in untouched_rows {
        if !row.has_day_values() {
            continue;
        }
        for day_index in 0..DAY_COLUMNS {
            if row.day_values[day_index].trim().is_empty() {
                continue;
            }
            host.set_field(row.row_index, FieldKind::Day(day_index), "")
                .await;
        }
        cleared += 1;
    }
    cleared
}

// ---------------------------------------------------------------------------
// Recalculation
// ---------------------------------------------------------------------------

/// Invoke the host's recalculation control if it exists, then let it settle.
/// Absence of the control is not an error; the caller reports it as "not
/// invoked".
pub async fn trigger_recalculation(host: &dyn HostSurface) -> bool {
    if !host.invoke_recalculate().await {
        return false;
    }
    host.wait(SETTLE_RECALCULATE_MS).await;
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
