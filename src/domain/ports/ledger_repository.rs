//! LedgerRepository port - abstraction for the reviewed ledger
//!
//! The ledger is an append-only list of basenames a reviewer has confirmed
//! for one output folder. The domain only needs to read it as a set and to
//! append new names; the on-disk format belongs to the infrastructure layer.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::LotResult;

/// Abstract repository for the reviewed ledger of an output folder
pub trait LedgerRepository {
    /// Load the ledger entries for `output_dir` (empty if no ledger exists yet)
    fn load(&self, output_dir: &Path) -> LotResult<BTreeSet<String>>;

    /// Append `basenames` that are not already recorded.
    ///
    /// Returns how many new entries were written. The ledger is created on
    /// first append and never rewritten or truncated.
    fn append(&self, output_dir: &Path, basenames: &[String]) -> LotResult<usize>;
}
