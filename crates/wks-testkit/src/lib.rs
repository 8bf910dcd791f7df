//! wks-testkit
//!
//! Scenario wiring helpers shared by the cross-crate behavioral tests under
//! `tests/` and by anything else that needs a quickly seeded grid or
//! payload. Everything here is deterministic; no real delays occur anywhere
//! in a scenario run.

use serde_json::json;

use wks_grid_mem::{GridSeed, MemGrid, RowSeed};

/// One desired line for [`flat_payload`]: project, task, hour-type, Mon..Fri.
pub type PayloadLine<'a> = (&'a str, &'a str, &'a str, [f64; 5]);

/// Render a flat-shape payload document from desired lines.
pub fn flat_payload(lines: &[PayloadLine<'_>]) -> String {
    let rows: Vec<_> = lines
        .iter()
        .map(|(project, task, hour_type, hours)| {
            json!({
                "projectName": project,
                "taskName": task,
                "hourTypeName": hour_type,
                "hours": hours,
            })
        })
        .collect();
    json!({ "rows": rows }).to_string()
}

/// A grid whose first rows carry the given identities/hours, padded with
/// `blank_rows` empty rows, both controls present.
pub fn seeded_grid(rows: &[(&str, &str, &str, [&str; 5])], blank_rows: usize) -> MemGrid {
    let mut seed_rows: Vec<RowSeed> = rows
        .iter()
        .map(|(project, task, hour_type, days)| RowSeed {
            project: project.to_string(),
            task: task.to_string(),
            hour_type: hour_type.to_string(),
            days: days.iter().map(|d| d.to_string()).collect(),
        })
        .collect();
    seed_rows.extend(std::iter::repeat(RowSeed::default()).take(blank_rows));

    MemGrid::from_seed(GridSeed {
        rows: seed_rows,
        ..GridSeed::default()
    })
}
