//! Property tests for the two-phase renamer.

use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use lotname::application::AtomicRenamer;
use lotname::domain::entities::RenamePlan;
use lotname::infrastructure::LocalFs;

/// A permutation of `0..n` as a shuffled vector
fn permutation() -> impl Strategy<Value = Vec<usize>> {
    (1usize..12).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: applying any permutation (cycles and chains included)
    /// moves every file to its destination and loses nothing.
    #[test]
    fn property_permutation_loses_no_file(perm in permutation()) {
        let dir = tempdir().unwrap();
        let name = |i: usize| format!("6({}).jpg", i + 1);
        for i in 0..perm.len() {
            fs::write(dir.path().join(name(i)), format!("content-{i}")).unwrap();
        }

        let plan = RenamePlan::from_pairs(
            perm.iter()
                .enumerate()
                .map(|(i, &to)| (dir.path().join(name(i)), dir.path().join(name(to)))),
        )
        .unwrap();

        AtomicRenamer::new(LocalFs::new()).apply(&plan).unwrap();

        let remaining = fs::read_dir(dir.path()).unwrap().count();
        prop_assert_eq!(remaining, perm.len());
        for (i, &to) in perm.iter().enumerate() {
            let moved = fs::read_to_string(dir.path().join(name(to))).unwrap();
            prop_assert_eq!(moved, format!("content-{i}"));
        }
        prop_assert!(AtomicRenamer::new(LocalFs::new()).stale_temp_files(dir.path()).is_empty());
    }
}
