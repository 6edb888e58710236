//! Review Session
//!
//! Backs a human review pass over an input folder (originals) and an output
//! folder (crops). Lots are navigated in review order; reorder and delete
//! operations rewrite the output lot on disk through the planner and the
//! two-phase renamer, then refresh the in-memory lot from the new names.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::entities::{ImageAsset, Lot};
use crate::domain::ports::{FileSystem, LedgerRepository};
use crate::domain::services::completion::is_done;
use crate::domain::services::RenamePlanner;
use crate::domain::value_objects::LotId;
use crate::error::{LotError, LotResult};

use super::index::{all_lot_ids, LotIndex, LotMap};
use super::rename::{AtomicRenamer, DEFAULT_TEMP_PREFIX};

/// Input and output image shown side by side at one display rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewPair<'a> {
    /// 1-based display rank
    pub rank: usize,
    pub before: Option<&'a ImageAsset>,
    pub after: Option<&'a ImageAsset>,
}

/// Outcome of copying reviewed images out of the session
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    pub destination: PathBuf,
    /// Files written to the destination
    pub copied: Vec<PathBuf>,
    /// Files left alone because the destination already had that name
    pub skipped: Vec<PathBuf>,
}

/// Stateful review of one input/output folder pair
pub struct ReviewSession<FS, LR>
where
    FS: FileSystem,
    LR: LedgerRepository,
{
    fs: FS,
    ledger: LR,
    planner: RenamePlanner,
    temp_prefix: String,
    input: PathBuf,
    output: PathBuf,
    inputs: LotMap,
    outputs: LotMap,
    lots: Vec<LotId>,
    cursor: usize,
    /// Lot opened by `jump_to` that is not part of the navigation list
    detour: Option<LotId>,
}

impl<FS, LR> ReviewSession<FS, LR>
where
    FS: FileSystem,
    LR: LedgerRepository,
{
    /// Scan both folders and start at the first lot
    pub fn open(
        fs: FS,
        ledger: LR,
        planner: RenamePlanner,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        let mut session = Self {
            fs,
            ledger,
            planner,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            input: input.into(),
            output: output.into(),
            inputs: LotMap::new(),
            outputs: LotMap::new(),
            lots: Vec::new(),
            cursor: 0,
            detour: None,
        };
        session.rescan();
        session
    }

    pub fn with_temp_prefix(mut self, temp_prefix: impl Into<String>) -> Self {
        self.temp_prefix = temp_prefix.into();
        self
    }

    /// Re-read both folders from disk, keeping the current lot if it still exists
    pub fn rescan(&mut self) {
        let current = self.current().cloned();
        let index = LotIndex::new(&self.fs, *self.planner.codec());
        self.inputs = index.scan(&self.input);
        self.outputs = index.scan(&self.output);
        self.lots = all_lot_ids(&self.inputs, &self.outputs);
        self.cursor = current
            .and_then(|id| self.lots.iter().position(|l| *l == id))
            .unwrap_or(0);
        self.detour = None;
        debug!(lots = self.lots.len(), "review session scanned");
    }

    /// Drop finished lots from the navigation list; returns how many were dropped.
    ///
    /// They remain reachable through `jump_to`.
    pub fn skip_done(&mut self, consult_ledger: bool) -> LotResult<usize> {
        let reviewed = if consult_ledger {
            Some(self.ledger.load(&self.output)?)
        } else {
            None
        };
        let before = self.lots.len();
        let (inputs, outputs) = (&self.inputs, &self.outputs);
        // lots without input images always stay
        self.lots.retain(|id| match inputs.get(id) {
            Some(lot) => !is_done(lot, outputs.get(id), reviewed.as_ref()),
            None => true,
        });
        self.cursor = 0;
        self.detour = None;
        Ok(before - self.lots.len())
    }

    pub fn input_folder(&self) -> &Path {
        &self.input
    }

    pub fn output_folder(&self) -> &Path {
        &self.output
    }

    /// Navigation list in review order
    pub fn lots(&self) -> &[LotId] {
        &self.lots
    }

    pub fn current(&self) -> Option<&LotId> {
        self.detour.as_ref().or_else(|| self.lots.get(self.cursor))
    }

    /// Move to the next lot, staying on the last one
    pub fn next(&mut self) -> Option<&LotId> {
        self.open_index(self.cursor.saturating_add(1))
    }

    /// Move to the previous lot, staying on the first one
    pub fn prev(&mut self) -> Option<&LotId> {
        self.open_index(self.cursor.saturating_sub(1))
    }

    fn open_index(&mut self, index: usize) -> Option<&LotId> {
        if self.detour.take().is_none() {
            self.cursor = index.min(self.lots.len().saturating_sub(1));
        }
        self.current()
    }

    /// Open a lot by id.
    ///
    /// An exact match wins over a case-insensitive one. Lots dropped by
    /// `skip_done` can still be opened; `next`/`prev` then return to the
    /// navigation list where it was left.
    pub fn jump_to(&mut self, target: &str) -> LotResult<&LotId> {
        let target = target.trim();
        let find = |ids: &[LotId]| {
            ids.iter()
                .position(|id| id.as_str() == target)
                .or_else(|| ids.iter().position(|id| id.as_str().eq_ignore_ascii_case(target)))
        };

        if let Some(index) = find(&self.lots) {
            self.cursor = index;
            self.detour = None;
        } else {
            let known = all_lot_ids(&self.inputs, &self.outputs);
            let index = find(&known).ok_or_else(|| LotError::UnknownLot {
                lot: target.to_string(),
            })?;
            self.detour = Some(known[index].clone());
        }
        self.current().ok_or_else(|| LotError::UnknownLot {
            lot: target.to_string(),
        })
    }

    /// Input images of `lot`, in display order
    pub fn before(&self, lot: &LotId) -> &[ImageAsset] {
        self.inputs.get(lot).map(Lot::assets).unwrap_or_default()
    }

    /// Output images of `lot`, in display order
    pub fn after(&self, lot: &LotId) -> &[ImageAsset] {
        self.outputs.get(lot).map(Lot::assets).unwrap_or_default()
    }

    /// Pair input and output images of `lot` by display rank
    pub fn pairs(&self, lot: &LotId) -> Vec<ReviewPair<'_>> {
        let (before, after) = (self.before(lot), self.after(lot));
        (0..before.len().max(after.len()))
            .map(|i| ReviewPair {
                rank: i + 1,
                before: before.get(i),
                after: after.get(i),
            })
            .collect()
    }

    /// Move the output image at `from` to index `to` and renumber the lot on
    /// disk to 1..n in the new order. Returns the number of files renamed.
    pub fn move_asset(&mut self, lot: &LotId, from: usize, to: usize) -> LotResult<usize> {
        let mut order = self.output_assets(lot)?;
        let len = order.len();
        for index in [from, to] {
            if index >= len {
                return Err(LotError::AssetOutOfRange {
                    lot: lot.to_string(),
                    index,
                    len,
                });
            }
        }
        if from == to {
            return Ok(0);
        }

        let moved = order.remove(from);
        order.insert(to, moved);
        let renamed = self.resequence(lot, &order)?;
        info!(lot = %lot, from, to, renamed, "reordered lot");
        Ok(renamed)
    }

    /// Delete the output image at `index`, record its name as reviewed so
    /// later runs skip it, and renumber the remaining images.
    ///
    /// Returns the removed path.
    pub fn delete_asset(&mut self, lot: &LotId, index: usize) -> LotResult<PathBuf> {
        let mut order = self.output_assets(lot)?;
        if index >= order.len() {
            return Err(LotError::AssetOutOfRange {
                lot: lot.to_string(),
                index,
                len: order.len(),
            });
        }

        let removed = order.remove(index);
        let path = removed.path().to_path_buf();
        if self.fs.exists(&path) {
            self.fs
                .remove(&path)
                .map_err(|source| LotError::RemoveFailed {
                    path: path.clone(),
                    source,
                })?;
        }
        self.ledger
            .append(&self.output, &[removed.file_name().to_string()])?;

        self.resequence(lot, &order)?;
        info!(lot = %lot, path = %path.display(), "deleted image");
        Ok(path)
    }

    /// Record the current lot as reviewed; returns how many ledger lines were added.
    ///
    /// Input basenames are recorded, or the output basenames when the lot has
    /// no input images.
    pub fn mark_current_reviewed(&mut self) -> LotResult<usize> {
        let Some(lot) = self.current().cloned() else {
            return Ok(0);
        };
        let names = match self.inputs.get(&lot) {
            Some(input) => input.file_names(),
            None => self
                .outputs
                .get(&lot)
                .map(Lot::file_names)
                .unwrap_or_default(),
        };
        self.ledger.append(&self.output, &names)
    }

    /// Mark the current lot reviewed, then move to the next one
    pub fn mark_and_next(&mut self) -> LotResult<Option<&LotId>> {
        self.mark_current_reviewed()?;
        Ok(self.next())
    }

    /// Mark the current lot reviewed, then move to the previous one
    pub fn mark_and_prev(&mut self) -> LotResult<Option<&LotId>> {
        self.mark_current_reviewed()?;
        Ok(self.prev())
    }

    /// Copy every output image of the navigation list's lots into `destination`.
    ///
    /// Names are kept; a file already present in `destination` is never
    /// overwritten.
    pub fn export_reviewed(&self, destination: &Path) -> LotResult<ExportReport> {
        let mut report = ExportReport {
            destination: destination.to_path_buf(),
            ..Default::default()
        };

        for lot in &self.lots {
            for asset in self.after(lot) {
                let target = destination.join(asset.file_name());
                if self.fs.exists(&target) {
                    report.skipped.push(target);
                    continue;
                }
                self.fs
                    .copy(asset.path(), &target)
                    .map_err(|source| LotError::CopyFailed {
                        from: asset.path().to_path_buf(),
                        to: target.clone(),
                        source,
                    })?;
                report.copied.push(target);
            }
        }

        info!(
            destination = %destination.display(),
            copied = report.copied.len(),
            skipped = report.skipped.len(),
            "exported reviewed images"
        );
        Ok(report)
    }

    fn output_assets(&self, lot: &LotId) -> LotResult<Vec<ImageAsset>> {
        if !self.inputs.contains_key(lot) && !self.outputs.contains_key(lot) {
            return Err(LotError::UnknownLot {
                lot: lot.to_string(),
            });
        }
        Ok(self.after(lot).to_vec())
    }

    fn resequence(&mut self, lot: &LotId, order: &[ImageAsset]) -> LotResult<usize> {
        let plan = self.planner.plan_resequence(order)?;
        let renamed = AtomicRenamer::with_temp_prefix(&self.fs, self.temp_prefix.as_str())
            .apply(&plan)?;

        let index = LotIndex::new(&self.fs, *self.planner.codec());
        match index.scan_lot(&self.output, lot) {
            Some(refreshed) => {
                self.outputs.insert(lot.clone(), refreshed);
            }
            None => {
                self.outputs.remove(lot);
            }
        }
        Ok(renamed)
    }
}
