//! Scenario: dry run with 2 matched, 1 empty-fill, 2 pending. The outcome
//! reports all four counts and the host sees zero mutation.

use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::{flat_payload, seeded_grid};

#[tokio::test]
async fn scenario_dry_run_reports_counts_and_touches_nothing() {
    let host = seeded_grid(
        &[
            ("Alpha", "Build", "Straight", ["8", "", "", "", ""]),
            ("Beta", "Review", "Straight", ["", "4", "", "", ""]),
        ],
        1,
    );
    let payload = flat_payload(&[
        ("Alpha", "Build", "Straight", [8.0; 5]),
        ("Beta", "Review", "Straight", [8.0; 5]),
        ("Gamma", "Test", "Straight", [8.0; 5]),
        ("Delta", "Deploy", "Straight", [8.0; 5]),
        ("Epsilon", "Support", "Straight", [8.0; 5]),
    ]);
    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };

    let outcome = ImportEngine::new().run(&host, &payload, &options).await;

    assert!(outcome.ok, "outcome: {outcome:?}");
    let message = outcome.message.unwrap();
    assert!(message.contains("Dry run completed."));
    assert!(message.contains("Rows in payload: 5"));
    assert!(message.contains("Matched rows now: 2"));
    assert!(message.contains("Rows to fill from empty slots: 1"));
    assert!(message.contains("Rows still missing: 2"));
    assert!(message.contains("Would invoke the add-row control 2 time(s)."));

    assert_eq!(host.mutation_count(), 0);
    assert_eq!(host.recalculate_count(), 0);
    assert_eq!(host.visible_row_count(), 3);
}

#[tokio::test]
async fn scenario_dry_run_omits_add_line_when_adding_disabled() {
    let host = seeded_grid(&[], 1);
    let payload = flat_payload(&[
        ("Alpha", "Build", "Straight", [8.0; 5]),
        ("Beta", "Review", "Straight", [8.0; 5]),
    ]);
    let options = RunOptions {
        dry_run: true,
        allow_add_rows: false,
        ..RunOptions::default()
    };

    let outcome = ImportEngine::new().run(&host, &payload, &options).await;

    assert!(outcome.ok);
    let message = outcome.message.unwrap();
    assert!(message.contains("Rows still missing: 1"));
    assert!(!message.contains("Would invoke"));
}
