//! Atomic Renamer
//!
//! Executes a `RenamePlan` in two phases so that chains and cycles never
//! overwrite a file that still has to move:
//!
//! 1. every source is moved to a fresh temporary name in its own folder
//! 2. every temporary is moved to its final destination
//!
//! Temporary names start with a dot, so they never parse as lot images and
//! an interrupted run leaves nothing a scan would mistake for an asset.
//! Each temporary name ends with the basename of its destination. When a
//! source is gone, a leftover staged file headed for the same destination
//! is committed instead, so re-applying a plan after a failure in either
//! phase finishes the job.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::domain::entities::{RenameEntry, RenamePlan};
use crate::domain::ports::FileSystem;
use crate::error::{LotError, LotResult};

/// Default prefix for staging names
pub const DEFAULT_TEMP_PREFIX: &str = ".lotname-tmp-";

/// Two-phase executor for rename plans
pub struct AtomicRenamer<FS>
where
    FS: FileSystem,
{
    fs: FS,
    temp_prefix: String,
}

impl<FS> AtomicRenamer<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS) -> Self {
        Self::with_temp_prefix(fs, DEFAULT_TEMP_PREFIX)
    }

    pub fn with_temp_prefix(fs: FS, temp_prefix: impl Into<String>) -> Self {
        Self {
            fs,
            temp_prefix: temp_prefix.into(),
        }
    }

    /// Apply `plan`, returning how many files reached their destination.
    ///
    /// On failure the error names the move that failed. Files already staged
    /// keep their temporary names until the same plan is applied again.
    pub fn apply(&self, plan: &RenamePlan) -> LotResult<usize> {
        if plan.is_empty() {
            return Ok(0);
        }
        plan.validate()?;

        let tag = run_tag();
        let mut used: HashSet<PathBuf> = plan
            .iter()
            .flat_map(|e| [e.from.clone(), e.to.clone()])
            .collect();
        let mut counter = 0u64;

        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(plan.len());
        for entry in plan {
            if !self.fs.exists(&entry.from) {
                match self.pending_stage(entry, &claimed) {
                    Some(temp) => {
                        info!(
                            temp = %temp.display(),
                            destination = %entry.to.display(),
                            "resuming staged rename"
                        );
                        claimed.insert(temp.clone());
                        staged.push((temp, entry.to.as_path()));
                    }
                    None => {
                        warn!(source = %entry.from.display(), "rename source missing, skipping")
                    }
                }
                continue;
            }
            let temp = self.staging_path(entry, &tag, &mut counter, &mut used);
            self.fs
                .rename(&entry.from, &temp)
                .map_err(|source| LotError::RenameFailed {
                    from: entry.from.clone(),
                    to: temp.clone(),
                    source,
                })?;
            debug!(from = %entry.from.display(), temp = %temp.display(), "staged");
            staged.push((temp, entry.to.as_path()));
        }

        let mut renamed = 0;
        for (temp, destination) in staged {
            if self.fs.exists(destination) {
                warn!(
                    destination = %destination.display(),
                    "replacing a file the plan does not move"
                );
            }
            self.fs
                .rename(&temp, destination)
                .map_err(|source| LotError::RenameFailed {
                    from: temp.clone(),
                    to: destination.to_path_buf(),
                    source,
                })?;
            renamed += 1;
        }

        info!(renamed, planned = plan.len(), "applied rename plan");
        Ok(renamed)
    }

    /// Commit every leftover staged file in `folder` whose destination is
    /// known and free. Returns how many files were restored.
    pub fn recover(&self, folder: &Path) -> LotResult<usize> {
        let mut restored = 0;
        for temp in self.stale_temp_files(folder) {
            let Some(name) = self.staged_destination(&temp) else {
                continue;
            };
            let destination = folder.join(name);
            if self.fs.exists(&destination) {
                warn!(
                    temp = %temp.display(),
                    destination = %destination.display(),
                    "staged file's destination is taken, leaving it"
                );
                continue;
            }
            self.fs
                .rename(&temp, &destination)
                .map_err(|source| LotError::RenameFailed {
                    from: temp.clone(),
                    to: destination.clone(),
                    source,
                })?;
            info!(destination = %destination.display(), "restored staged file");
            restored += 1;
        }
        Ok(restored)
    }

    /// Leftover staging files in `folder` from an interrupted run
    pub fn stale_temp_files(&self, folder: &Path) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = self
            .fs
            .list_files(folder)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&self.temp_prefix))
            })
            .collect();
        found.sort();
        found
    }

    /// Destination basename encoded in a staging file's name
    pub fn staged_destination<'a>(&self, temp: &'a Path) -> Option<&'a str> {
        let name = temp.file_name()?.to_str()?;
        name.strip_prefix(self.temp_prefix.as_str())?
            .splitn(4, '-')
            .nth(3)
            .filter(|dest| !dest.is_empty())
    }

    /// A leftover staged file for `entry`'s destination, if an earlier run
    /// staged the source but never committed it
    fn pending_stage(&self, entry: &RenameEntry, claimed: &HashSet<PathBuf>) -> Option<PathBuf> {
        let folder = entry.from.parent()?;
        let destination = entry.to.file_name()?.to_str()?;
        self.stale_temp_files(folder).into_iter().find(|temp| {
            !claimed.contains(temp) && self.staged_destination(temp) == Some(destination)
        })
    }

    fn staging_path(
        &self,
        entry: &RenameEntry,
        tag: &str,
        counter: &mut u64,
        used: &mut HashSet<PathBuf>,
    ) -> PathBuf {
        let folder = entry.from.parent().unwrap_or_else(|| Path::new(""));
        let destination = entry
            .to
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        loop {
            *counter += 1;
            let candidate = folder.join(format!(
                "{}{}-{}-{}",
                self.temp_prefix, tag, counter, destination
            ));
            if !used.contains(&candidate) && !self.fs.exists(&candidate) {
                used.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

/// Per-run tag keeping staging names apart from other processes and earlier runs
fn run_tag() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{}-{:08x}", std::process::id(), nanos)
}
