//! Run orchestration.
//!
//! One run is a single forward-only asynchronous sequence with no parallel
//! branches: the host surface is the only shared mutable resource and this
//! engine is its only writer during a run. The engine is not reentrant — an
//! atomic in-flight flag rejects a second `run` until the previous outcome
//! resolves. There is no cancellation token: a started run proceeds to
//! completion or failure (abrupt cancellation is out of scope).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;
use uuid::Uuid;

use wks_apply::{apply_assignments, clear_untouched, expand_capacity, trigger_recalculation};
use wks_host::{inventory, HostSurface};
use wks_payload::parse_desired_items;
use wks_plan::{build_plan, ReconciliationPlan};

use crate::{RunError, RunOptions, RunOutcome};

/// Orchestrator for reconciliation runs against one host instance.
#[derive(Debug, Default)]
pub struct ImportEngine {
    in_flight: AtomicBool,
}

impl ImportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one run and return its outcome. Never returns an `Err` and
    /// never panics on bad input: every failure is folded into
    /// `RunOutcome { ok: false, .. }` here.
    pub async fn run(
        &self,
        host: &dyn HostSurface,
        raw_payload: &str,
        options: &RunOptions,
    ) -> RunOutcome {
        // Busy-guard: the caller must serialize runs; a concurrent attempt
        // fails fast instead of interleaving mutations.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return RunOutcome::from(RunError::Unexpected(
                "a run is already in flight against this host".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        let outcome = match execute(host, raw_payload, options, run_id).await {
            Ok(message) => RunOutcome::success(message),
            Err(err) => {
                info!(%run_id, error = %err, "run failed");
                RunOutcome::from(err)
            }
        };

        self.in_flight.store(false, Ordering::Release);
        outcome
    }
}

/// The run sequence proper. Structural failures return early; writing,
/// clearing, and confirming are best-effort and cannot fail the run.
async fn execute(
    host: &dyn HostSurface,
    raw_payload: &str,
    options: &RunOptions,
    run_id: Uuid,
) -> Result<String, RunError> {
    // Parsing.
    let desired = parse_desired_items(raw_payload)?;
    info!(%run_id, items = desired.len(), "parsed desired payload");

    // Inventorying + Planning.
    let rows = inventory::capture(host).await?;
    let plan = build_plan(&desired, &rows);
    info!(
        %run_id,
        rows = rows.len(),
        matched = plan.matched_count(),
        empty_fill = plan.empty_fill_count(),
        pending = plan.pending.len(),
        "computed plan"
    );

    if options.dry_run {
        return Ok(dry_run_message(desired.len(), &plan, options));
    }

    // Expanding -> Re-Inventorying -> Re-Planning, only when the plan
    // overflows. Row identities may shift during growth, so the re-plan
    // starts from a fresh snapshot.
    let mut added_rows = 0;
    let plan = if plan.pending.is_empty() {
        plan
    } else {
        if !options.allow_add_rows {
            return Err(RunError::InsufficientCapacity {
                missing: plan.pending.len(),
            });
        }
        added_rows = expand_capacity(host, plan.pending.len()).await;
        info!(%run_id, added_rows, "capacity expansion done");

        let rows = inventory::capture(host).await?;
        let replan = build_plan(&desired, &rows);
        if !replan.pending.is_empty() {
            return Err(RunError::CapacityStillInsufficient {
                missing: replan.pending.len(),
            });
        }
        replan
    };

    // Writing.
    apply_assignments(host, &plan, options.overwrite_row_hours).await;

    // Clearing.
    let cleared_rows = if options.clear_untouched_rows {
        clear_untouched(host, &plan.untouched_rows).await
    } else {
        0
    };

    // Confirming.
    let recalculated = if options.trigger_recalculation {
        trigger_recalculation(host).await
    } else {
        false
    };

    info!(%run_id, imported = plan.assignments.len(), cleared_rows, recalculated, "run completed");
    Ok(success_message(&plan, added_rows, cleared_rows, recalculated))
}

fn success_message(
    plan: &ReconciliationPlan,
    added_rows: usize,
    cleared_rows: usize,
    recalculated: bool,
) -> String {
    [
        "Import completed.".to_string(),
        format!("Rows imported: {}", plan.assignments.len()),
        format!("Matched existing rows: {}", plan.matched_count()),
        format!("Used empty/new rows: {}", plan.empty_fill_count()),
        format!("Rows added by control: {added_rows}"),
        format!("Untouched rows cleared: {cleared_rows}"),
        format!(
            "Recalculate invoked: {}",
            if recalculated { "yes" } else { "no" }
        ),
        "Review the values and save the timecard yourself.".to_string(),
    ]
    .join("\n")
}

fn dry_run_message(desired_count: usize, plan: &ReconciliationPlan, options: &RunOptions) -> String {
    let mut lines = vec![
        "Dry run completed.".to_string(),
        format!("Rows in payload: {desired_count}"),
        format!("Matched rows now: {}", plan.matched_count()),
        format!("Rows to fill from empty slots: {}", plan.empty_fill_count()),
        format!("Rows still missing: {}", plan.pending.len()),
    ];
    if !plan.pending.is_empty() && options.allow_add_rows {
        lines.push(format!(
            "Would invoke the add-row control {} time(s).",
            plan.pending.len()
        ));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;
    use wks_grid_mem::MemGrid;
    use wks_host::{FieldKind, RawRow};

    fn flat_payload() -> String {
        serde_json::json!({
            "rows": [
                { "projectName": "Alpha", "taskName": "Build", "hourTypeName": "Straight",
                  "hours": [8, 8, 8, 8, 8] }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn malformed_payload_fails_before_touching_the_host() {
        let host = MemGrid::with_blank_rows(3);
        let engine = ImportEngine::new();

        let outcome = engine.run(&host, "{broken", &RunOptions::default()).await;

        assert!(!outcome.ok);
        assert!(outcome.error.unwrap().starts_with("InvalidPayload:"));
        assert_eq!(host.mutation_count(), 0);
    }

    #[tokio::test]
    async fn zero_host_rows_is_no_rows_detected() {
        let host = MemGrid::with_blank_rows(0);
        let engine = ImportEngine::new();

        let outcome = engine.run(&host, &flat_payload(), &RunOptions::default()).await;

        assert!(!outcome.ok);
        assert!(outcome.error.unwrap().starts_with("NoRowsDetected:"));
    }

    #[tokio::test]
    async fn completed_run_reports_counts_in_message() {
        let host = MemGrid::with_blank_rows(3);
        let engine = ImportEngine::new();

        let outcome = engine.run(&host, &flat_payload(), &RunOptions::default()).await;

        assert!(outcome.ok);
        let message = outcome.message.unwrap();
        assert!(message.contains("Rows imported: 1"));
        assert!(message.contains("Used empty/new rows: 1"));
        assert!(message.contains("Recalculate invoked: yes"));
    }

    /// Host whose first snapshot blocks until released, so a second run can
    /// be attempted while the first is provably in flight.
    struct GatedHost {
        inner: MemGrid,
        gate: Arc<Notify>,
        released: Notify,
        blocked: AtomicBool,
    }

    #[async_trait]
    impl HostSurface for GatedHost {
        async fn list_rows(&self) -> Vec<RawRow> {
            if self
                .blocked
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.gate.notify_one();
                self.released.notified().await;
            }
            self.inner.list_rows().await
        }
        async fn set_field(&self, row_index: usize, field: FieldKind, text: &str) {
            self.inner.set_field(row_index, field, text).await;
        }
        async fn invoke_add_row(&self) -> bool {
            self.inner.invoke_add_row().await
        }
        async fn invoke_recalculate(&self) -> bool {
            self.inner.invoke_recalculate().await
        }
        async fn wait(&self, ms: u64) {
            self.inner.wait(ms).await;
        }
    }

    #[tokio::test]
    async fn busy_guard_rejects_a_concurrent_run() {
        let host = Arc::new(GatedHost {
            inner: MemGrid::with_blank_rows(3),
            gate: Arc::new(Notify::new()),
            released: Notify::new(),
            blocked: AtomicBool::new(false),
        });
        let engine = Arc::new(ImportEngine::new());

        let first = {
            let host = Arc::clone(&host);
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .run(host.as_ref(), &flat_payload(), &RunOptions::default())
                    .await
            })
        };

        // Wait until the first run is inside its inventory snapshot.
        host.gate.notified().await;

        let second = engine
            .run(host.as_ref(), &flat_payload(), &RunOptions::default())
            .await;
        assert!(!second.ok);
        assert!(second.error.unwrap().contains("already in flight"));

        host.released.notify_one();
        let first = first.await.unwrap();
        assert!(first.ok);
    }
}
