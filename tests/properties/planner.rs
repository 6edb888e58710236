//! Property tests for rename planning applied to real folders.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use lotname::application::{AtomicRenamer, LotIndex};
use lotname::domain::services::{NameCodec, RenamePlanner};
use lotname::domain::value_objects::{LotId, Scheme};
use lotname::infrastructure::LocalFs;

#[derive(Debug, Clone)]
struct LotLayout {
    bare: Option<&'static str>,
    /// position -> (scheme, extension); one file per position
    indexed: BTreeMap<u32, (Scheme, &'static str)>,
}

fn extension() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("jpg"), Just("png")]
}

fn layout() -> impl Strategy<Value = LotLayout> {
    let scheme = prop_oneof![
        Just(Scheme::Parenthesized),
        Just(Scheme::Underscore),
        Just(Scheme::Hyphen),
    ];
    (
        proptest::option::of(extension()),
        proptest::collection::btree_map(1u32..8, (scheme, extension()), 0..5),
    )
        .prop_filter("lot needs at least one image", |(bare, indexed)| {
            bare.is_some() || !indexed.is_empty()
        })
        .prop_map(|(bare, indexed)| LotLayout { bare, indexed })
}

fn write_layout(dir: &Path, codec: &NameCodec, layout: &LotLayout) -> BTreeSet<String> {
    let lot = LotId::new("6");
    let mut names = BTreeSet::new();
    if let Some(ext) = layout.bare {
        names.insert(codec.render(&lot, 0, Scheme::Bare, ext));
    }
    for (&position, &(scheme, ext)) in &layout.indexed {
        names.insert(codec.render(&lot, position, scheme, ext));
    }
    for name in &names {
        fs::write(dir.join(name), name).unwrap();
    }
    names
}

fn contents(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| fs::read_to_string(e.unwrap().path()).unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: plans are injective, applying them loses nothing, the lot
    /// ends with a position 1, and planning again yields an empty plan.
    #[test]
    fn property_plan_apply_is_idempotent(layout in layout(), paren_space in any::<bool>()) {
        let dir = tempdir().unwrap();
        let codec = NameCodec::new(paren_space);
        let planner = RenamePlanner::new(codec, Default::default());
        let written = write_layout(dir.path(), &codec, &layout);

        let index = LotIndex::new(LocalFs::new(), codec);
        let lot_id = LotId::new("6");
        let lot = index.scan_lot(dir.path(), &lot_id).unwrap();
        let plan = planner.plan_for_lot(&lot).unwrap();

        let destinations: BTreeSet<_> = plan.iter().map(|e| e.to.clone()).collect();
        prop_assert_eq!(destinations.len(), plan.len());

        AtomicRenamer::new(LocalFs::new()).apply(&plan).unwrap();

        // Same file contents, same count
        prop_assert_eq!(contents(dir.path()), written.clone());

        let after = index.scan_lot(dir.path(), &lot_id).unwrap();
        prop_assert_eq!(after.len(), written.len());
        prop_assert!(after.bare().is_none());
        prop_assert!(after.at_position(1).is_some());

        let again = planner.plan_for_lot(&after).unwrap();
        prop_assert!(again.is_empty(), "second plan not empty: {:?}", again);
    }

    /// PROPERTY: resequencing in any order yields positions 1..=n with no loss.
    #[test]
    fn property_resequence_is_contiguous(
        layout in layout(),
        seed in any::<u64>(),
    ) {
        let dir = tempdir().unwrap();
        let codec = NameCodec::default();
        let planner = RenamePlanner::new(codec, Default::default());
        let written = write_layout(dir.path(), &codec, &layout);

        let index = LotIndex::new(LocalFs::new(), codec);
        let lot_id = LotId::new("6");
        let mut assets = index.scan_lot(dir.path(), &lot_id).unwrap().into_assets();
        let len = assets.len();
        assets.rotate_left((seed as usize) % len);

        let plan = planner.plan_resequence(&assets).unwrap();
        AtomicRenamer::new(LocalFs::new()).apply(&plan).unwrap();

        prop_assert_eq!(contents(dir.path()), written.clone());
        let after = index.scan_lot(dir.path(), &lot_id).unwrap();
        let positions: Vec<u32> = after.assets().iter().map(|a| a.position()).collect();
        let expected: Vec<u32> = (1..=len as u32).collect();
        prop_assert_eq!(positions, expected);
    }
}
