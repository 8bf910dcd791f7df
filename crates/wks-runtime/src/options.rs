//! Run options: five booleans with explicit defaults, deserializable so a
//! caller-supplied options document can omit any subset.

use serde::{Deserialize, Serialize};

/// Per-run behavior switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunOptions {
    /// Grow the grid via the host's add-row control when the plan overflows.
    pub allow_add_rows: bool,
    /// Write all five day cells, blanking zero-equivalent desired hours.
    /// When `false`, only non-zero desired hours are written and existing
    /// values are left alone.
    pub overwrite_row_hours: bool,
    /// Blank the day cells of rows no assignment touched.
    pub clear_untouched_rows: bool,
    /// Invoke the host's recalculation control after writing.
    pub trigger_recalculation: bool,
    /// Plan and report counts only; perform no host mutation.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            allow_add_rows: true,
            overwrite_row_hours: true,
            clear_untouched_rows: false,
            trigger_recalculation: true,
            dry_run: false,
        }
    }
}
