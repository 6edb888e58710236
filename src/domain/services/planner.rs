//! Rename planning service
//!
//! Pure domain logic deciding which files of a lot must move. No I/O: the
//! resulting `RenamePlan` is executed by `AtomicRenamer`.
//!
//! Export rule: every lot has an image at position 1, and a bare image always
//! becomes position 1.
//!
//! | before                    | after                          |
//! |---------------------------|--------------------------------|
//! | `6`                       | `6(1)`                         |
//! | `6`, `6(1)`, `6(2)`       | `6(1)`, `6(2)`, `6(3)`         |
//! | `6`, `6(2)`, `6(3)`       | `6(1)`, `6(2)`, `6(3)`         |
//! | `6_2`, `6_3`              | `6_1`, `6_3`                   |
//! | `6(1)`, `6(2)`            | unchanged                      |

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::entities::{ImageAsset, Lot, RenamePlan};
use crate::domain::value_objects::{Scheme, SchemePreference};
use crate::error::LotResult;

use super::NameCodec;

/// Plans canonical renames for lots
#[derive(Debug, Clone, Default)]
pub struct RenamePlanner {
    codec: NameCodec,
    preference: SchemePreference,
}

impl RenamePlanner {
    pub fn new(codec: NameCodec, preference: SchemePreference) -> Self {
        Self { codec, preference }
    }

    pub fn codec(&self) -> &NameCodec {
        &self.codec
    }

    /// Scheme used for every position this planner assigns in `assets`
    pub fn governing_scheme(&self, assets: &[ImageAsset]) -> Scheme {
        self.preference
            .governing(assets.iter().map(ImageAsset::scheme))
    }

    /// Compute the moves that make `lot` satisfy the export rule.
    ///
    /// When two assets claim the same role (two bare files, or two files at
    /// one position) only the first in lot order is considered; the others
    /// are left where they are. Assets already at their target are omitted,
    /// so planning an already-normalized lot yields an empty plan.
    pub fn plan_for_lot(&self, lot: &Lot) -> LotResult<RenamePlan> {
        let governing = self.governing_scheme(lot.assets());
        let bare = lot.bare();

        let mut indexed: BTreeMap<u32, &ImageAsset> = BTreeMap::new();
        for asset in lot.assets().iter().filter(|a| !a.is_bare()) {
            indexed.entry(asset.position()).or_insert(asset);
        }

        let mut plan = RenamePlan::new();
        match bare {
            Some(bare) => {
                if indexed.contains_key(&1) {
                    // Highest first so no move lands on a file that has not moved yet
                    for (&position, asset) in indexed.iter().rev() {
                        let target = self.target_path(asset, position.saturating_add(1), governing);
                        plan.insert(asset.path(), target)?;
                    }
                }
                plan.insert(bare.path(), self.target_path(bare, 1, governing))?;
            }
            None if !indexed.contains_key(&1) => {
                if let Some(asset) = indexed.values().next() {
                    plan.insert(asset.path(), self.target_path(asset, 1, governing))?;
                }
            }
            None => {}
        }

        plan.validate_against(lot.assets().iter().map(ImageAsset::path))?;

        debug!(
            lot = %lot.lot_id(),
            scheme = %governing,
            moves = plan.len(),
            "planned lot normalization"
        );
        Ok(plan)
    }

    /// Renumber `ordered` to positions 1..=n in the given order.
    ///
    /// Every asset keeps its own scheme except bare ones, which take the
    /// governing scheme. Swapping two images produces a cycle, which the
    /// two-phase renamer handles.
    pub fn plan_resequence(&self, ordered: &[ImageAsset]) -> LotResult<RenamePlan> {
        let governing = self.governing_scheme(ordered);

        let mut plan = RenamePlan::new();
        for (index, asset) in ordered.iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let scheme = if asset.is_bare() {
                governing
            } else {
                asset.scheme()
            };
            plan.insert(asset.path(), self.target_path(asset, position, scheme))?;
        }

        plan.validate_against(ordered.iter().map(ImageAsset::path))?;
        Ok(plan)
    }

    fn target_path(&self, asset: &ImageAsset, position: u32, scheme: Scheme) -> PathBuf {
        let name = self
            .codec
            .render(asset.lot_id(), position, scheme, asset.extension());
        asset.folder().join(name)
    }
}
