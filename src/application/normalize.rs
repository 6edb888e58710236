//! Normalize Use Case
//!
//! Brings every lot of an output folder to canonical names: scan, plan each
//! lot, apply each plan. A dry run stops after planning. A lot that cannot be
//! planned or applied is recorded as skipped and the remaining lots still run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::RenamePlan;
use crate::domain::ports::FileSystem;
use crate::domain::services::RenamePlanner;
use crate::domain::value_objects::LotId;
use crate::error::LotResult;

use super::index::LotIndex;
use super::rename::AtomicRenamer;

/// Planned (and possibly applied) moves for one lot
#[derive(Debug, Clone, Serialize)]
pub struct LotNormalization {
    pub lot_id: LotId,
    pub plan: RenamePlan,
}

/// A lot left untouched because its plan could not be built or applied
#[derive(Debug, Clone, Serialize)]
pub struct SkippedLot {
    pub lot_id: LotId,
    pub reason: String,
}

/// Result of normalizing a folder
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeReport {
    /// Folder that was normalized
    pub folder: PathBuf,
    /// Lots that needed at least one move
    pub lots: Vec<LotNormalization>,
    /// Lots that failed; a lot that failed while applying may be partly moved
    pub skipped: Vec<SkippedLot>,
    /// Number of lots scanned
    pub scanned: usize,
    /// Files moved (always 0 in a dry run)
    pub renamed: usize,
    /// Staged files from an earlier failed run that were committed first
    pub recovered: usize,
    pub dry_run: bool,
}

impl NormalizeReport {
    /// Total number of planned moves
    pub fn planned(&self) -> usize {
        self.lots.iter().map(|l| l.plan.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.lots.is_empty() && self.skipped.is_empty()
    }
}

/// Normalize use case
pub struct NormalizeUseCase<FS>
where
    FS: FileSystem,
{
    fs: FS,
    planner: RenamePlanner,
    temp_prefix: String,
}

impl<FS> NormalizeUseCase<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS, planner: RenamePlanner, temp_prefix: impl Into<String>) -> Self {
        Self {
            fs,
            planner,
            temp_prefix: temp_prefix.into(),
        }
    }

    /// Normalize every lot in `folder`.
    ///
    /// Lots are processed in review order. Per-lot failures end up in
    /// `NormalizeReport::skipped`. Unless `dry_run` is set, staged files left
    /// by an earlier failed apply are committed before the scan.
    pub fn normalize(&self, folder: &Path, dry_run: bool) -> LotResult<NormalizeReport> {
        let index = LotIndex::new(&self.fs, *self.planner.codec());
        let renamer = AtomicRenamer::with_temp_prefix(&self.fs, self.temp_prefix.as_str());

        let recovered = if dry_run { 0 } else { renamer.recover(folder)? };
        let lots = index.scan(folder);
        let mut report = NormalizeReport {
            folder: folder.to_path_buf(),
            scanned: lots.len(),
            recovered,
            dry_run,
            ..Default::default()
        };

        for (lot_id, lot) in lots {
            let plan = match self.planner.plan_for_lot(&lot) {
                Ok(plan) if plan.is_empty() => continue,
                Ok(plan) => plan,
                Err(e) => {
                    warn!(lot = %lot_id, error = %e, "cannot plan lot, skipping");
                    report.skipped.push(SkippedLot {
                        lot_id,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !dry_run {
                match renamer.apply(&plan) {
                    Ok(renamed) => report.renamed += renamed,
                    Err(e) => {
                        warn!(lot = %lot_id, error = %e, "rename failed, skipping lot");
                        report.skipped.push(SkippedLot {
                            lot_id,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                }
            }
            report.lots.push(LotNormalization { lot_id, plan });
        }

        info!(
            folder = %folder.display(),
            lots = report.lots.len(),
            skipped = report.skipped.len(),
            renamed = report.renamed,
            dry_run,
            "normalized folder"
        );
        Ok(report)
    }
}
