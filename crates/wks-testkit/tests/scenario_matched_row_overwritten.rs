//! Scenario: the host already carries a row whose labels equate to the
//! desired combo but with different hours. Overwrite mode rewrites all five
//! day cells, including blanking days the payload leaves at zero.

use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::{flat_payload, seeded_grid};

#[tokio::test]
async fn scenario_matched_row_hours_are_overwritten() {
    // Host labels are longer than the desired names; they equate by
    // substring, so the row matches rather than being treated as occupied.
    let host = seeded_grid(
        &[(
            "Alpha Project",
            "Build Phase",
            "Straight Time",
            ["1", "2", "3", "", ""],
        )],
        0,
    );
    let payload = flat_payload(&[("Alpha", "Build", "Straight", [8.0, 0.0, 7.5, 0.0, 4.0])]);

    let outcome = ImportEngine::new()
        .run(&host, &payload, &RunOptions::default())
        .await;

    assert!(outcome.ok, "outcome: {outcome:?}");
    let message = outcome.message.unwrap();
    assert!(message.contains("Matched existing rows: 1"));
    assert!(message.contains("Used empty/new rows: 0"));

    // Identity fields were rewritten to the exact desired text (plain
    // inequality, not equivalence, decides rewrites).
    assert_eq!(
        host.identity(0),
        (
            "Alpha".to_string(),
            "Build".to_string(),
            "Straight".to_string()
        )
    );
    assert_eq!(
        host.day_values(0),
        ["8", "", "7.5", "", "4"].map(String::from)
    );
}
