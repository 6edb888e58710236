//! Lot index - groups a folder's images into lots
//!
//! The folder listing is sorted by filename before grouping, so "first
//! encountered" (used to pick the canonical asset among duplicates) means
//! lexicographically smallest name on every platform. A bare file always
//! precedes the position-1 file of its lot.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::domain::entities::{ImageAsset, Lot};
use crate::domain::ports::FileSystem;
use crate::domain::services::NameCodec;
use crate::domain::value_objects::{order_lot_ids, LotId};

/// Lots of one folder keyed by id. Iteration follows review order.
pub type LotMap = BTreeMap<LotId, Lot>;

/// Scans folders into lots
pub struct LotIndex<FS>
where
    FS: FileSystem,
{
    fs: FS,
    codec: NameCodec,
}

impl<FS> LotIndex<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS, codec: NameCodec) -> Self {
        Self { fs, codec }
    }

    pub fn codec(&self) -> &NameCodec {
        &self.codec
    }

    /// Group every lot image in `folder` by lot id.
    ///
    /// A missing or unreadable folder yields an empty map; files that are
    /// not lot images are ignored.
    pub fn scan(&self, folder: &Path) -> LotMap {
        let mut paths = match self.fs.list_files(folder) {
            Ok(paths) => paths,
            Err(e) => {
                debug!(folder = %folder.display(), error = %e, "folder unavailable, treating as empty");
                return LotMap::new();
            }
        };
        paths.sort();

        let mut grouped: BTreeMap<LotId, Vec<ImageAsset>> = BTreeMap::new();
        let mut ignored = 0usize;
        for path in &paths {
            match self.codec.parse_path(path) {
                Some(asset) => grouped.entry(asset.lot_id().clone()).or_default().push(asset),
                None => ignored += 1,
            }
        }

        debug!(
            folder = %folder.display(),
            lots = grouped.len(),
            ignored,
            "scanned folder"
        );

        grouped
            .into_iter()
            .map(|(lot_id, assets)| (lot_id.clone(), Lot::new(lot_id, assets)))
            .collect()
    }

    /// Scan `folder` and return a single lot, if present
    pub fn scan_lot(&self, folder: &Path, lot_id: &LotId) -> Option<Lot> {
        self.scan(folder).remove(lot_id)
    }

    /// Every lot id found in either folder, in review order
    pub fn all_lot_ids(&self, first: &Path, second: &Path) -> Vec<LotId> {
        all_lot_ids(&self.scan(first), &self.scan(second))
    }
}

/// Every lot id present in either map, in review order
pub fn all_lot_ids(a: &LotMap, b: &LotMap) -> Vec<LotId> {
    order_lot_ids(a.keys().chain(b.keys()).cloned())
}
