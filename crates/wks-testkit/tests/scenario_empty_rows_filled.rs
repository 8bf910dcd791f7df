//! Scenario: one desired item, three blank rows. The first blank row is
//! claimed, identity and hours land in it, nothing else is touched.

use wks_grid_mem::MemGrid;
use wks_runtime::{ImportEngine, RunOptions};
use wks_testkit::flat_payload;

#[tokio::test]
async fn scenario_one_item_fills_first_empty_row() {
    let host = MemGrid::with_blank_rows(3);
    let payload = flat_payload(&[("Alpha", "Build", "Straight", [8.0, 8.0, 8.0, 8.0, 8.0])]);

    let outcome = ImportEngine::new()
        .run(&host, &payload, &RunOptions::default())
        .await;

    assert!(outcome.ok, "outcome: {outcome:?}");
    let message = outcome.message.unwrap();
    assert!(message.contains("Rows imported: 1"));
    assert!(message.contains("Matched existing rows: 0"));
    assert!(message.contains("Used empty/new rows: 1"));

    assert_eq!(
        host.identity(0),
        (
            "Alpha".to_string(),
            "Build".to_string(),
            "Straight".to_string()
        )
    );
    assert_eq!(host.day_values(0), ["8", "8", "8", "8", "8"].map(String::from));
    // Rows 1 and 2 stay blank.
    assert_eq!(host.identity(1).0, "");
    assert_eq!(host.day_values(2), [""; 5].map(String::from));
}
