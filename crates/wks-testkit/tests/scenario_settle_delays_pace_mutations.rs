//! Scenario: the run paces itself with settle delays after identity writes
//! and after recalculation. The in-memory host accounts waits without
//! sleeping, so the total is exact.

use wks_apply::writer::{
    SETTLE_HOUR_TYPE_MS, SETTLE_PROJECT_MS, SETTLE_RECALCULATE_MS, SETTLE_TASK_MS,
};
use wks_grid_mem::MemGrid;
use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::flat_payload;

#[tokio::test]
async fn scenario_total_settle_time_is_the_sum_of_the_delays() {
    let host = MemGrid::with_blank_rows(1);
    let payload = flat_payload(&[("Alpha", "Build", "Straight", [8.0; 5])]);

    let outcome = ImportEngine::new()
        .run(&host, &payload, &RunOptions::default())
        .await;

    assert!(outcome.ok);
    // Three identity writes on a blank row, then one recalculation settle.
    let expected =
        SETTLE_PROJECT_MS + SETTLE_TASK_MS + SETTLE_HOUR_TYPE_MS + SETTLE_RECALCULATE_MS;
    assert_eq!(host.waited_ms(), expected);
}

#[tokio::test]
async fn scenario_matching_identity_skips_settles() {
    let host = MemGrid::with_blank_rows(1);
    let payload = flat_payload(&[("Alpha", "Build", "Straight", [8.0; 5])]);
    let engine = ImportEngine::new();

    let first = engine.run(&host, &payload, &RunOptions::default()).await;
    assert!(first.ok);
    let after_first = host.waited_ms();

    // Identity already matches: the second run only re-settles after
    // recalculation.
    let second = engine.run(&host, &payload, &RunOptions::default()).await;
    assert!(second.ok);
    assert_eq!(host.waited_ms() - after_first, SETTLE_RECALCULATE_MS);
}
