//! ImageAsset entity - one lot image on disk
//!
//! Assets are produced by scanning a folder and are never mutated: a rename
//! yields a new asset on the next scan. The filesystem stays the source of
//! truth.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::{LotId, Scheme};

/// A parsed lot image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    lot_id: LotId,
    /// Raw encoded position; 0 means bare (no suffix)
    position: u32,
    scheme: Scheme,
    /// Lowercased extension without the dot
    extension: String,
    path: PathBuf,
}

impl ImageAsset {
    /// Build an asset. A position of 0 always means `Scheme::Bare`, and a
    /// bare scheme always means position 0.
    pub(crate) fn new(
        lot_id: LotId,
        position: u32,
        scheme: Scheme,
        extension: impl Into<String>,
        path: PathBuf,
    ) -> Self {
        debug_assert_eq!(position == 0, scheme == Scheme::Bare);
        Self {
            lot_id,
            position,
            scheme,
            extension: extension.into().to_lowercase(),
            path,
        }
    }

    pub fn lot_id(&self) -> &LotId {
        &self.lot_id
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename of the file
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Returns true for the unindexed `6.jpg` form
    pub fn is_bare(&self) -> bool {
        self.position == 0
    }

    /// Rank shown to a reviewer: bare counts as 1, everything else is its position
    pub fn display_order(&self) -> u32 {
        if self.position == 0 {
            1
        } else {
            self.position
        }
    }

    /// Folder containing the asset
    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}
