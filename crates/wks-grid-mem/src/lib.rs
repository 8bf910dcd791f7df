//! Deterministic in-memory grid host adapter.
//!
//! Design decisions (kept intentionally simple/deterministic):
//! - `wait` accounts the requested milliseconds without sleeping, so runs
//!   and tests finish instantly while still recording pacing behavior.
//! - Row growth latency is modeled in snapshots, not time: a row added via
//!   the add-row control becomes visible only after `add_latency_polls`
//!   further `list_rows` calls. The default is zero (immediately visible).
//! - Control presence is a flag per control; an absent control makes the
//!   corresponding `invoke_*` return `false`, exactly like a page without
//!   the button.
//! - Every mutation increments a counter so dry-run tests can assert that
//!   nothing was touched.
//!
//! The adapter is seedable from a JSON grid snapshot ([`GridSeed`]) and can
//! render its current state back into one, which is what the rehearsal CLI
//! reads and writes.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use wks_host::{FieldKind, HostSurface, RawRow, DAY_COLUMNS};

// ---------------------------------------------------------------------------
// Seed format
// ---------------------------------------------------------------------------

/// One seeded row. `days` may carry fewer than five entries; missing cells
/// are blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowSeed {
    pub project: String,
    pub task: String,
    pub hour_type: String,
    pub days: Vec<String>,
}

/// Serializable grid snapshot used to seed (and dump) a [`MemGrid`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSeed {
    pub rows: Vec<RowSeed>,
    pub add_row_control: bool,
    pub recalculate_control: bool,
    /// Snapshots an added row stays invisible for.
    pub add_latency_polls: u32,
}

impl Default for GridSeed {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            add_row_control: true,
            recalculate_control: true,
            add_latency_polls: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// MemGrid
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct MemRow {
    project: String,
    task: String,
    hour_type: String,
    days: [String; DAY_COLUMNS],
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<MemRow>,
    /// Countdown (in snapshots) until each queued row joins `rows`.
    queued: Vec<u32>,
    add_row_control: bool,
    recalculate_control: bool,
    add_latency_polls: u32,
    waited_ms: u64,
    recalculate_count: u32,
    mutation_count: u64,
}

/// In-memory [`HostSurface`] implementation.
#[derive(Debug)]
pub struct MemGrid {
    state: Mutex<State>,
}

impl MemGrid {
    /// Grid with `count` completely blank rows and both controls present.
    pub fn with_blank_rows(count: usize) -> Self {
        Self::from_seed(GridSeed {
            rows: vec![RowSeed::default(); count],
            ..GridSeed::default()
        })
    }

    pub fn from_seed(seed: GridSeed) -> Self {
        let rows = seed
            .rows
            .into_iter()
            .map(|row| {
                let mut days: [String; DAY_COLUMNS] = Default::default();
                for (i, value) in row.days.into_iter().take(DAY_COLUMNS).enumerate() {
                    days[i] = value;
                }
                MemRow {
                    project: row.project,
                    task: row.task,
                    hour_type: row.hour_type,
                    days,
                }
            })
            .collect();

        Self {
            state: Mutex::new(State {
                rows,
                queued: Vec::new(),
                add_row_control: seed.add_row_control,
                recalculate_control: seed.recalculate_control,
                add_latency_polls: seed.add_latency_polls,
                waited_ms: 0,
                recalculate_count: 0,
                mutation_count: 0,
            }),
        }
    }

    /// Render current rows (visible ones only) back into a seed document.
    pub fn to_seed(&self) -> GridSeed {
        let state = self.state.lock().unwrap();
        GridSeed {
            rows: state
                .rows
                .iter()
                .map(|row| RowSeed {
                    project: row.project.clone(),
                    task: row.task.clone(),
                    hour_type: row.hour_type.clone(),
                    days: row.days.to_vec(),
                })
                .collect(),
            add_row_control: state.add_row_control,
            recalculate_control: state.recalculate_control,
            add_latency_polls: state.add_latency_polls,
        }
    }

    // -- test/inspection accessors ------------------------------------------

    pub fn visible_row_count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub fn waited_ms(&self) -> u64 {
        self.state.lock().unwrap().waited_ms
    }

    pub fn recalculate_count(&self) -> u32 {
        self.state.lock().unwrap().recalculate_count
    }

    pub fn mutation_count(&self) -> u64 {
        self.state.lock().unwrap().mutation_count
    }

    /// Day-cell text of one visible row. Panics on a bad index (test use).
    pub fn day_values(&self, row_index: usize) -> [String; DAY_COLUMNS] {
        self.state.lock().unwrap().rows[row_index].days.clone()
    }

    /// Identity-field text of one visible row (test use).
    pub fn identity(&self, row_index: usize) -> (String, String, String) {
        let state = self.state.lock().unwrap();
        let row = &state.rows[row_index];
        (row.project.clone(), row.task.clone(), row.hour_type.clone())
    }
}

#[async_trait]
impl HostSurface for MemGrid {
    async fn list_rows(&self) -> Vec<RawRow> {
        let mut state = self.state.lock().unwrap();

        // Mature queued rows: each snapshot ticks every countdown once.
        let mut matured = 0;
        for countdown in state.queued.iter_mut() {
            if *countdown == 0 {
                matured += 1;
            } else {
                *countdown -= 1;
            }
        }
        state.queued.drain(..matured);
        for _ in 0..matured {
            state.rows.push(MemRow::default());
        }

        state
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| RawRow {
                row_index,
                project_text: row.project.clone(),
                task_text: row.task.clone(),
                hour_type_text: row.hour_type.clone(),
                day_values: row.days.clone(),
            })
            .collect()
    }

    async fn set_field(&self, row_index: usize, field: FieldKind, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.mutation_count += 1;
        let Some(row) = state.rows.get_mut(row_index) else {
            return;
        };
        match field {
            FieldKind::Project => row.project = text.to_string(),
            FieldKind::Task => row.task = text.to_string(),
            FieldKind::HourType => row.hour_type = text.to_string(),
            FieldKind::Day(day_index) => {
                if day_index < DAY_COLUMNS {
                    row.days[day_index] = text.to_string();
                }
            }
        }
    }

    async fn invoke_add_row(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.add_row_control {
            return false;
        }
        state.mutation_count += 1;
        if state.add_latency_polls == 0 {
            state.rows.push(MemRow::default());
        } else {
            let countdown = state.add_latency_polls;
            state.queued.push(countdown);
        }
        true
    }

    async fn invoke_recalculate(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.recalculate_control {
            return false;
        }
        state.mutation_count += 1;
        state.recalculate_count += 1;
        true
    }

    async fn wait(&self, ms: u64) {
        self.state.lock().unwrap().waited_ms += ms;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
