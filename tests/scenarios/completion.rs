//! Scenario: deciding which lots a resumed run can skip

use tempfile::tempdir;

use lotname::application::CompletionTracker;
use lotname::domain::services::NameCodec;
use lotname::domain::value_objects::LotId;
use lotname::infrastructure::{LocalFs, TextLedgerRepository};

use crate::common::write_images;

/// SCENARIO 5: two inputs, two renamed outputs, empty ledger
#[test]
fn scenario_done_by_count_not_by_review() {
    let root = tempdir().unwrap();
    let (input, output) = (root.path().join("in"), root.path().join("out"));
    write_images(&input, &["6.jpg", "6(1).jpg"]);
    write_images(&output, &["6(1).jpg", "6(2).jpg"]);

    let tracker = CompletionTracker::new(LocalFs::new(), NameCodec::default(), TextLedgerRepository::new());

    let done = tracker.already_done(&input, &output, false).unwrap();
    assert!(done.contains(&LotId::new("6")));

    let done = tracker.already_done(&input, &output, true).unwrap();
    assert!(done.is_empty());

    let status = tracker.status(&input, &output, true).unwrap();
    assert_eq!(status.lots[0].accounted_for, 0);
}

/// SCENARIO: reviewing a lot makes it done in ledger mode
#[test]
fn scenario_review_completes_lot() {
    let root = tempdir().unwrap();
    let (input, output) = (root.path().join("in"), root.path().join("out"));
    write_images(&input, &["6.jpg", "6(1).jpg", "7.jpg"]);
    write_images(&output, &["6(1).jpg", "6(2).jpg", "7(1).jpg"]);

    let tracker = CompletionTracker::new(LocalFs::new(), NameCodec::default(), TextLedgerRepository::new());
    tracker
        .mark_lot_reviewed(&input, &output, &LotId::new("6"))
        .unwrap();

    let done = tracker.already_done(&input, &output, true).unwrap();
    assert_eq!(done.into_iter().collect::<Vec<_>>(), [LotId::new("6")]);

    let all = tracker.already_done(&input, &output, false).unwrap();
    assert_eq!(all.len(), 2);
}

/// SCENARIO: an empty or missing input folder has nothing to do
#[test]
fn scenario_missing_input_folder() {
    let root = tempdir().unwrap();
    let tracker = CompletionTracker::new(LocalFs::new(), NameCodec::default(), TextLedgerRepository::new());

    let done = tracker
        .already_done(&root.path().join("in"), &root.path().join("out"), true)
        .unwrap();
    assert!(done.is_empty());
}
