//! RenamePlan entity - the moves needed to bring one lot to canonical names
//!
//! A plan is a partial injective map from existing paths to target paths.
//! It may contain chains and cycles (`A -> B`, `B -> A`); the two-phase
//! renamer executes those safely. What a plan may never contain is two
//! sources sharing a destination, or a destination that is an existing file
//! the plan does not itself move away.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LotError, LotResult};

/// One planned move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameEntry {
    /// Basename of the source
    pub fn from_name(&self) -> String {
        file_name_lossy(&self.from)
    }

    /// Basename of the destination
    pub fn to_name(&self) -> String {
        file_name_lossy(&self.to)
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Planned moves for one lot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    entries: Vec<RenameEntry>,
}

impl RenamePlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a move. Moves onto the same path are dropped.
    ///
    /// Fails with `DuplicateSource` or `PlanConflict` if the move would break
    /// injectivity.
    pub fn insert(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> LotResult<()> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return Ok(());
        }
        if self.entries.iter().any(|e| e.from == from) {
            return Err(LotError::DuplicateSource { source_path: from });
        }
        if let Some(existing) = self.entries.iter().find(|e| e.to == to) {
            return Err(LotError::PlanConflict {
                destination: to,
                first: existing.from.clone(),
                second: from,
            });
        }
        self.entries.push(RenameEntry { from, to });
        Ok(())
    }

    /// Build a plan from raw pairs, checking injectivity
    pub fn from_pairs<I, P, Q>(pairs: I) -> LotResult<Self>
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        let mut plan = Self::new();
        for (from, to) in pairs {
            plan.insert(from, to)?;
        }
        Ok(plan)
    }

    /// Re-check injectivity of the whole plan
    pub fn validate(&self) -> LotResult<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            for other in &self.entries[..i] {
                if other.from == entry.from {
                    return Err(LotError::DuplicateSource {
                        source_path: entry.from.clone(),
                    });
                }
                if other.to == entry.to {
                    return Err(LotError::PlanConflict {
                        destination: entry.to.clone(),
                        first: other.from.clone(),
                        second: entry.from.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check that no destination is an existing path left in place by the plan
    pub fn validate_against<'a, I>(&self, existing: I) -> LotResult<()>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in existing {
            if self.moves(path) {
                continue;
            }
            if let Some(entry) = self.entries.iter().find(|e| e.to == path) {
                return Err(LotError::OccupiedDestination {
                    destination: entry.to.clone(),
                });
            }
        }
        Ok(())
    }

    /// True if `path` is a source of this plan
    pub fn moves(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.from == path)
    }

    /// Where `path` ends up (itself if the plan leaves it alone)
    pub fn destination_of<'a>(&'a self, path: &'a Path) -> &'a Path {
        self.entries
            .iter()
            .find(|e| e.from == path)
            .map(|e| e.to.as_path())
            .unwrap_or(path)
    }

    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a RenameEntry;
    type IntoIter = std::slice::Iter<'a, RenameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
