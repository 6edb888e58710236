//! Scenario: a cropped export folder gets canonical names
//!
//! Every lot must end with an image at position 1; a bare image always
//! becomes position 1.

use std::path::Path;

use tempfile::tempdir;

use lotname::application::{AtomicRenamer, LotIndex, NormalizeUseCase};
use lotname::domain::services::{NameCodec, RenamePlanner};
use lotname::domain::value_objects::{LotId, SchemePreference};
use lotname::infrastructure::LocalFs;

use crate::common::{content, file_names, write_images};

fn moves(folder: &Path, codec: NameCodec) -> Vec<(String, String)> {
    let lot = LotIndex::new(LocalFs::new(), codec)
        .scan_lot(folder, &LotId::new("6"))
        .unwrap();
    let plan = RenamePlanner::new(codec, SchemePreference::default())
        .plan_for_lot(&lot)
        .unwrap();
    let mut moves: Vec<_> = plan.iter().map(|e| (e.from_name(), e.to_name())).collect();
    moves.sort();
    moves
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

/// SCENARIO 1: a lone bare image becomes position 1
#[test]
fn scenario_bare_only() {
    let dir = tempdir().unwrap();
    write_images(dir.path(), &["6.jpg"]);

    assert_eq!(
        moves(dir.path(), NameCodec::default()),
        owned(&[("6.jpg", "6(1).jpg")])
    );
    assert_eq!(
        moves(dir.path(), NameCodec::new(true)),
        owned(&[("6.jpg", "6 (1).jpg")])
    );
}

/// SCENARIO 2: bare plus (1), (2) shifts the chain upward on disk
#[test]
fn scenario_bare_shifts_chain() {
    let dir = tempdir().unwrap();
    write_images(dir.path(), &["6.jpg", "6(1).jpg", "6(2).jpg"]);

    assert_eq!(
        moves(dir.path(), NameCodec::default()),
        owned(&[
            ("6(1).jpg", "6(2).jpg"),
            ("6(2).jpg", "6(3).jpg"),
            ("6.jpg", "6(1).jpg"),
        ])
    );

    let report = NormalizeUseCase::new(LocalFs::new(), RenamePlanner::default(), ".lotname-tmp-")
        .normalize(dir.path(), false)
        .unwrap();
    assert_eq!(report.renamed, 3);
    assert_eq!(file_names(dir.path()), ["6(1).jpg", "6(2).jpg", "6(3).jpg"]);
    assert_eq!(content(dir.path(), "6(1).jpg"), "6.jpg");
    assert_eq!(content(dir.path(), "6(3).jpg"), "6(2).jpg");
}

/// SCENARIO 3: bare fills a missing (1) and nothing else moves
#[test]
fn scenario_bare_fills_gap() {
    let dir = tempdir().unwrap();
    write_images(dir.path(), &["6.jpg", "6(2).jpg", "6(3).jpg"]);

    assert_eq!(
        moves(dir.path(), NameCodec::default()),
        owned(&[("6.jpg", "6(1).jpg")])
    );
}

/// SCENARIO 4: underscore lot without index 1 promotes its smallest image
#[test]
fn scenario_underscore_gap() {
    let dir = tempdir().unwrap();
    write_images(dir.path(), &["6_2.jpg", "6_3.jpg"]);

    assert_eq!(
        moves(dir.path(), NameCodec::default()),
        owned(&[("6_2.jpg", "6_1.jpg")])
    );
}

/// SCENARIO: an interrupted run is visible and a rerun is a no-op
#[test]
fn scenario_rerun_after_normalization() {
    let dir = tempdir().unwrap();
    write_images(
        dir.path(),
        &["6.jpg", "6(1).jpg", "7-2.png", "8.jpg", "readme.txt"],
    );
    let use_case = NormalizeUseCase::new(LocalFs::new(), RenamePlanner::default(), ".lotname-tmp-");

    let first = use_case.normalize(dir.path(), false).unwrap();
    assert_eq!(first.lots.len(), 3);
    assert!(AtomicRenamer::new(LocalFs::new())
        .stale_temp_files(dir.path())
        .is_empty());

    let second = use_case.normalize(dir.path(), false).unwrap();
    assert!(second.is_clean());
    assert_eq!(
        file_names(dir.path()),
        ["6(1).jpg", "6(2).jpg", "7-1.png", "8(1).jpg", "readme.txt"]
    );
}
