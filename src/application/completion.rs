//! Completion Tracker
//!
//! Decides which input lots need no further work by comparing the input
//! folder against the output folder and, optionally, the reviewed ledger.
//! Also records review decisions in that ledger.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::Lot;
use crate::domain::ports::{FileSystem, LedgerRepository};
use crate::domain::services::completion::accounted_for;
use crate::domain::services::NameCodec;
use crate::domain::value_objects::LotId;
use crate::error::LotResult;

use super::index::LotIndex;

/// Completion state of one input lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotStatus {
    pub lot_id: LotId,
    /// Images in the input lot
    pub inputs: usize,
    /// Images in the output lot of the same id
    pub outputs: usize,
    /// Input images accounted for by the output (and ledger)
    pub accounted_for: usize,
    pub done: bool,
}

/// Completion state of every input lot, in review order
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompletionReport {
    pub consult_ledger: bool,
    pub lots: Vec<LotStatus>,
}

impl CompletionReport {
    pub fn done(&self) -> impl Iterator<Item = &LotStatus> {
        self.lots.iter().filter(|s| s.done)
    }

    pub fn pending(&self) -> impl Iterator<Item = &LotStatus> {
        self.lots.iter().filter(|s| !s.done)
    }

    pub fn done_ids(&self) -> BTreeSet<LotId> {
        self.done().map(|s| s.lot_id.clone()).collect()
    }
}

/// Tracks which lots are finished
pub struct CompletionTracker<FS, LR>
where
    FS: FileSystem,
    LR: LedgerRepository,
{
    index: LotIndex<FS>,
    ledger: LR,
}

impl<FS, LR> CompletionTracker<FS, LR>
where
    FS: FileSystem,
    LR: LedgerRepository,
{
    pub fn new(fs: FS, codec: NameCodec, ledger: LR) -> Self {
        Self {
            index: LotIndex::new(fs, codec),
            ledger,
        }
    }

    /// Lots of `input` whose images are all accounted for in `output`.
    ///
    /// With `consult_ledger`, every image must also have been recorded as
    /// reviewed. An empty input folder yields an empty set.
    pub fn already_done(
        &self,
        input: &Path,
        output: &Path,
        consult_ledger: bool,
    ) -> LotResult<BTreeSet<LotId>> {
        Ok(self.status(input, output, consult_ledger)?.done_ids())
    }

    /// Per-lot completion detail for every lot of `input`
    pub fn status(&self, input: &Path, output: &Path, consult_ledger: bool) -> LotResult<CompletionReport> {
        let reviewed = if consult_ledger {
            Some(self.ledger.load(output)?)
        } else {
            None
        };
        let inputs = self.index.scan(input);
        let outputs = self.index.scan(output);

        let lots = inputs
            .iter()
            .map(|(lot_id, lot)| {
                let out = outputs.get(lot_id);
                let accounted = accounted_for(lot, out, reviewed.as_ref());
                LotStatus {
                    lot_id: lot_id.clone(),
                    inputs: lot.len(),
                    outputs: out.map_or(0, Lot::len),
                    accounted_for: accounted,
                    done: !lot.is_empty() && accounted == lot.len(),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            input = %input.display(),
            output = %output.display(),
            lots = lots.len(),
            done = lots.iter().filter(|s| s.done).count(),
            consult_ledger,
            "computed completion"
        );
        Ok(CompletionReport {
            consult_ledger,
            lots,
        })
    }

    /// Input images of every lot that is not yet done, ignoring the ledger.
    ///
    /// This is the work list of a resumed cropping pass.
    pub fn pending_inputs(&self, input: &Path, output: &Path) -> LotResult<Vec<PathBuf>> {
        let done = self.already_done(input, output, false)?;
        Ok(self
            .index
            .scan(input)
            .into_iter()
            .filter(|(lot_id, _)| !done.contains(lot_id))
            .flat_map(|(_, lot)| lot.into_assets())
            .map(|asset| asset.path().to_path_buf())
            .collect())
    }

    /// Record `basenames` as reviewed for `output`; returns how many were new
    pub fn mark_reviewed(&self, output: &Path, basenames: &[String]) -> LotResult<usize> {
        self.ledger.append(output, basenames)
    }

    /// Record every image of `lot_id` as reviewed.
    ///
    /// The input lot's basenames are recorded; when the lot has no input
    /// images the output basenames are recorded instead.
    pub fn mark_lot_reviewed(&self, input: &Path, output: &Path, lot_id: &LotId) -> LotResult<usize> {
        let names = match self.index.scan_lot(input, lot_id) {
            Some(lot) => lot.file_names(),
            None => self
                .index
                .scan_lot(output, lot_id)
                .map(|lot| lot.file_names())
                .unwrap_or_default(),
        };
        self.mark_reviewed(output, &names)
    }

    /// Basenames already recorded as reviewed for `output`
    pub fn reviewed(&self, output: &Path) -> LotResult<BTreeSet<String>> {
        self.ledger.load(output)
    }
}
