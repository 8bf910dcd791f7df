//! Scenario: running the engine twice with the same payload and overwrite
//! mode leaves the host in the same state after the second run as after the
//! first (no drift), and the second run matches instead of claiming rows.

use anyhow::Result;
use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::{flat_payload, seeded_grid};

#[tokio::test]
async fn scenario_second_run_converges_to_the_same_state() -> Result<()> {
    let host = seeded_grid(&[("Old Project", "Old Task", "Straight", ["1", "1", "1", "1", "1"])], 2);
    let payload = flat_payload(&[
        ("Alpha", "Build", "Straight", [8.0, 8.0, 8.0, 8.0, 8.0]),
        ("Beta", "Review", "Overtime", [0.0, 2.0, 0.0, 2.0, 0.0]),
    ]);
    let engine = ImportEngine::new();

    let first = engine.run(&host, &payload, &RunOptions::default()).await;
    assert!(first.ok, "first run: {first:?}");
    let state_after_first = host.to_seed();

    let second = engine.run(&host, &payload, &RunOptions::default()).await;
    assert!(second.ok, "second run: {second:?}");
    let state_after_second = host.to_seed();

    assert_eq!(state_after_first, state_after_second);

    // The second run finds its own rows by identity match.
    let message = second.message.unwrap();
    assert!(message.contains("Matched existing rows: 2"));
    assert!(message.contains("Used empty/new rows: 0"));
    assert!(message.contains("Rows added by control: 0"));
    Ok(())
}
