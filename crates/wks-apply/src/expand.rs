//! Capacity expansion: ask the host to grow its row count, bounded both by
//! the number of missing rows and by a per-attempt poll budget.

use tracing::debug;

use wks_host::{wait_for_row_growth, HostSurface, PollSpec};

/// Request up to `missing` additional rows from the host.
///
/// Each attempt invokes the add-row control and then polls for a larger row
/// count (120ms interval, 12s timeout). A missing control or a timed-out
/// attempt ends the loop early without error; the caller detects any
/// remaining deficiency when it re-plans against a fresh inventory.
///
/// Returns the number of rows confirmed added.
pub async fn expand_capacity(host: &dyn HostSurface, missing: usize) -> usize {
    let mut added = 0;

    for attempt in 0..missing {
        let baseline = host.list_rows().await.len();
        if !host.invoke_add_row().await {
            debug!(attempt, "add-row control not found; stopping expansion");
            break;
        }
        if !wait_for_row_growth(host, baseline, PollSpec::grid_growth()).await {
            debug!(attempt, baseline, "row count did not grow; stopping expansion");
            break;
        }
        added += 1;
    }

    debug!(missing, added, "capacity expansion finished");
    added
}
