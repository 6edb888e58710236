//! Lot entity - every asset of one lot within one folder

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::value_objects::{LotId, Scheme};

use super::ImageAsset;

/// The assets sharing a lot id, in display order
///
/// A bare `6.jpg` comes before `6(1).jpg`, whatever the separator. Other
/// ties (two files claiming the same position) keep the order the assets
/// were handed in, which for scanned folders is filename order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lot {
    lot_id: LotId,
    assets: Vec<ImageAsset>,
}

impl Lot {
    /// Create a lot, stably sorting `assets` by display order, bare first
    pub fn new(lot_id: LotId, mut assets: Vec<ImageAsset>) -> Self {
        assets.sort_by_key(|a| (a.display_order(), !a.is_bare()));
        Self { lot_id, assets }
    }

    pub fn lot_id(&self) -> &LotId {
        &self.lot_id
    }

    /// Assets in display order
    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn into_assets(self) -> Vec<ImageAsset> {
        self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// First bare asset, if any
    pub fn bare(&self) -> Option<&ImageAsset> {
        self.assets.iter().find(|a| a.is_bare())
    }

    /// First asset encoding `position`
    pub fn at_position(&self, position: u32) -> Option<&ImageAsset> {
        self.assets.iter().find(|a| a.position() == position)
    }

    /// Distinct positions held by indexed assets
    pub fn occupied_positions(&self) -> BTreeSet<u32> {
        self.assets
            .iter()
            .filter(|a| !a.is_bare())
            .map(ImageAsset::position)
            .collect()
    }

    /// Schemes used by indexed assets
    pub fn indexed_schemes(&self) -> impl Iterator<Item = Scheme> + '_ {
        self.assets
            .iter()
            .map(ImageAsset::scheme)
            .filter(Scheme::is_indexed)
    }

    /// Basenames of every asset, in display order
    pub fn file_names(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.file_name().to_string()).collect()
    }
}
