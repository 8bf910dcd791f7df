//! Grid inventory: one canonical snapshot of the host surface per pass.

use crate::{GridRow, HostSurface};

/// Errors raised while inventorying the host grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InventoryError {
    /// The host exposes zero rows. This is the earliest failure point in a
    /// run: it fires before any desired-item processing is wasted.
    NoRowsDetected,
}

impl std::fmt::Display for InventoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryError::NoRowsDetected => {
                write!(f, "no entry rows detected on the host surface")
            }
        }
    }
}

impl std::error::Error for InventoryError {}

/// Snapshot the host's rows and classify each for emptiness.
///
/// Rows come back sorted by `row_index` regardless of the order the host
/// reported them in, so downstream first-fit scans are deterministic.
pub async fn capture(host: &dyn HostSurface) -> Result<Vec<GridRow>, InventoryError> {
    let raw = host.list_rows().await;
    if raw.is_empty() {
        return Err(InventoryError::NoRowsDetected);
    }

    let mut rows: Vec<GridRow> = raw.into_iter().map(GridRow::classify).collect();
    rows.sort_by_key(|row| row.row_index);
    Ok(rows)
}
