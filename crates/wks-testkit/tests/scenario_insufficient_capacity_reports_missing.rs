//! Scenario: five distinct desired items, two rows, adding disabled. The run
//! fails with InsufficientCapacity naming the missing count, before any
//! mutation.

use wks_grid_mem::MemGrid;
use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::flat_payload;

#[tokio::test]
async fn scenario_insufficient_capacity_names_missing_count() {
    let host = MemGrid::with_blank_rows(2);
    let payload = flat_payload(&[
        ("Alpha", "Build", "Straight", [8.0, 0.0, 0.0, 0.0, 0.0]),
        ("Beta", "Review", "Straight", [8.0, 0.0, 0.0, 0.0, 0.0]),
        ("Gamma", "Test", "Straight", [8.0, 0.0, 0.0, 0.0, 0.0]),
        ("Delta", "Deploy", "Straight", [8.0, 0.0, 0.0, 0.0, 0.0]),
        ("Epsilon", "Support", "Straight", [8.0, 0.0, 0.0, 0.0, 0.0]),
    ]);
    let options = RunOptions {
        allow_add_rows: false,
        ..RunOptions::default()
    };

    let outcome = ImportEngine::new().run(&host, &payload, &options).await;

    assert!(!outcome.ok);
    let error = outcome.error.unwrap();
    assert!(error.starts_with("InsufficientCapacity:"), "error: {error}");
    assert!(error.contains("missing 3 row(s)"));
    assert_eq!(host.mutation_count(), 0);
}
