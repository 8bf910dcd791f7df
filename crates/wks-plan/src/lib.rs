//! wks-plan
//!
//! Pairs desired items against inventoried grid rows into a reconciliation
//! plan. Pure and synchronous: no host access, no mutation.
//!
//! The matching is **greedy first-fit**, not maximum-cardinality: desired
//! items are processed in input order and each takes the first equivalent
//! unused row, else the first unused empty row. A later, more specific item
//! can therefore be left pending because an earlier, looser item already
//! consumed a shared candidate. This tie-break is a deliberate
//! behavior-preserving quirk; do not replace it with an optimal matching.

use serde::Serialize;

use wks_host::GridRow;
use wks_payload::{equiv::equivalent, DesiredItem};

// ---------------------------------------------------------------------------
// Plan model
// ---------------------------------------------------------------------------

/// How a desired item got its row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    /// Row identity fields already equate to the desired combo.
    Matched,
    /// Row was completely empty and is being claimed.
    Empty,
}

/// One desired item bound to one grid row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Assignment {
    pub desired: DesiredItem,
    pub row: GridRow,
    pub kind: AssignmentKind,
}

/// The computed pairing for one inventory pass.
///
/// Invariants (enforced by construction, asserted in tests):
/// - no `row_index` appears in more than one assignment;
/// - `assignments.len() + pending.len() == desired.len()`;
/// - `untouched_rows` is exactly the inventory rows no assignment references.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconciliationPlan {
    pub assignments: Vec<Assignment>,
    pub pending: Vec<DesiredItem>,
    pub untouched_rows: Vec<GridRow>,
}

impl ReconciliationPlan {
    pub fn matched_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.kind == AssignmentKind::Matched)
            .count()
    }

    pub fn empty_fill_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.kind == AssignmentKind::Empty)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Build the plan for one inventory snapshot.
///
/// Per desired item, in input order:
/// 1. first not-yet-used row whose project, task, and hour-type each equate
///    to the item's fields -> `Matched`;
/// 2. else first not-yet-used completely empty row -> `Empty`;
/// 3. else the item goes to `pending`.
pub fn build_plan(desired: &[DesiredItem], rows: &[GridRow]) -> ReconciliationPlan {
    let mut used = vec![false; rows.len()];
    let mut assignments = Vec::new();
    let mut pending = Vec::new();

    for item in desired {
        let selected = rows.iter().enumerate().find(|(i, row)| {
            !used[*i]
                && equivalent(&row.project_text, &item.project_name)
                && equivalent(&row.task_text, &item.task_name)
                && equivalent(&row.hour_type_text, &item.hour_type_name)
        });

        let (selected, kind) = match selected {
            Some((i, row)) => ((i, row), AssignmentKind::Matched),
            None => {
                match rows
                    .iter()
                    .enumerate()
                    .find(|(i, row)| !used[*i] && row.is_empty)
                {
                    Some((i, row)) => ((i, row), AssignmentKind::Empty),
                    None => {
                        pending.push(item.clone());
                        continue;
                    }
                }
            }
        };

        used[selected.0] = true;
        assignments.push(Assignment {
            desired: item.clone(),
            row: selected.1.clone(),
            kind,
        });
    }

    let untouched_rows = rows
        .iter()
        .enumerate()
        .filter(|(i, _)| !used[*i])
        .map(|(_, row)| row.clone())
        .collect();

    ReconciliationPlan {
        assignments,
        pending,
        untouched_rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
