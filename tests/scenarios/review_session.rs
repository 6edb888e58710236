//! Scenario: a reviewer walks the lots, fixes one, and exports
//!
//! Steps:
//! 1. Open a session over an input and an output folder
//! 2. Skip lots that are already reviewed
//! 3. Swap two images of a lot and delete a bad crop
//! 4. Mark lots reviewed while moving forward
//! 5. Export the result

use tempfile::tempdir;

use lotname::application::ReviewSession;
use lotname::domain::ports::LedgerRepository;
use lotname::domain::services::RenamePlanner;
use lotname::domain::value_objects::LotId;
use lotname::infrastructure::{LocalFs, TextLedgerRepository};

use crate::common::{content, file_names, write_images};

#[test]
fn scenario_review_fix_and_export() {
    let root = tempdir().unwrap();
    let (input, output) = (root.path().join("in"), root.path().join("out"));
    write_images(&input, &["5.jpg", "6.jpg", "6_2.jpg", "6_3.jpg", "7.jpg"]);
    write_images(&output, &["5(1).jpg", "6(1).jpg", "6(2).jpg", "6(3).jpg", "7(1).jpg"]);
    TextLedgerRepository::new()
        .append(&output, &["5.jpg".to_string()])
        .unwrap();

    // Step 1-2
    let mut session = ReviewSession::open(
        LocalFs::new(),
        TextLedgerRepository::new(),
        RenamePlanner::default(),
        &input,
        &output,
    );
    assert_eq!(session.lots().len(), 3);
    assert_eq!(session.skip_done(true).unwrap(), 1);
    assert_eq!(session.current(), Some(&LotId::new("6")));

    let lot = LotId::new("6");
    let pairs = session.pairs(&lot);
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].before.unwrap().file_name(), "6.jpg");
    assert_eq!(pairs[0].after.unwrap().file_name(), "6(1).jpg");

    // Step 3: swap the first two crops, then delete the last one
    session.move_asset(&lot, 1, 0).unwrap();
    assert_eq!(content(&output, "6(1).jpg"), "6(2).jpg");
    assert_eq!(content(&output, "6(2).jpg"), "6(1).jpg");

    let removed = session.delete_asset(&lot, 2).unwrap();
    assert_eq!(removed, output.join("6(3).jpg"));
    assert!(!removed.exists());
    assert!(TextLedgerRepository::new()
        .load(&output)
        .unwrap()
        .contains("6(3).jpg"));

    // Step 4
    assert_eq!(session.mark_and_next().unwrap(), Some(&LotId::new("7")));
    assert_eq!(session.mark_and_next().unwrap(), Some(&LotId::new("7")));
    let reviewed = TextLedgerRepository::new().load(&output).unwrap();
    for name in ["6.jpg", "6_2.jpg", "6_3.jpg", "7.jpg"] {
        assert!(reviewed.contains(name), "{name} missing from ledger");
    }

    // Hidden lots stay reachable
    assert_eq!(session.jump_to("5").unwrap(), &LotId::new("5"));
    assert_eq!(session.next(), Some(&LotId::new("7")));

    // Step 5: only the navigation list is exported
    let dest = root.path().join("final");
    let report = session.export_reviewed(&dest).unwrap();
    assert_eq!(report.copied.len(), 3);
    assert_eq!(file_names(&dest), ["6(1).jpg", "6(2).jpg", "7(1).jpg"]);
}
