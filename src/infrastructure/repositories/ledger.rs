//! Text Ledger Repository
//!
//! Implements the LedgerRepository port as a UTF-8 text file in the output
//! folder (`reviewed.txt` by default), one basename per line, no header.
//! Appends hold an exclusive lock on the ledger file so two reviewers
//! marking lots at once cannot interleave or duplicate lines.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info, warn};

use crate::domain::ports::LedgerRepository;
use crate::error::{LotError, LotResult};

/// Default ledger file name inside an output folder
pub const DEFAULT_LEDGER_FILE: &str = "reviewed.txt";

/// Newline-delimited ledger of reviewed basenames
#[derive(Debug, Clone)]
pub struct TextLedgerRepository {
    file_name: String,
}

impl TextLedgerRepository {
    /// Create a repository using the default `reviewed.txt` name
    pub fn new() -> Self {
        Self::with_file_name(DEFAULT_LEDGER_FILE)
    }

    /// Create a repository with a custom ledger file name
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Path of the ledger for `output_dir`
    pub fn ledger_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.file_name)
    }
}

impl Default for TextLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse ledger text into basenames. Lines holding full paths (`/` or `\`
/// separated, whatever the platform) are reduced to their basename; blank
/// lines are skipped.
fn parse_entries(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.rsplit(['/', '\\']).next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn ledger_error(path: &Path, err: impl std::fmt::Display) -> LotError {
    LotError::Ledger {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

impl LedgerRepository for TextLedgerRepository {
    fn load(&self, output_dir: &Path) -> LotResult<BTreeSet<String>> {
        let path = self.ledger_path(output_dir);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(parse_entries(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no reviewed ledger yet");
                Ok(BTreeSet::new())
            }
            Err(e) => Err(ledger_error(&path, e)),
        }
    }

    fn append(&self, output_dir: &Path, basenames: &[String]) -> LotResult<usize> {
        if basenames.is_empty() {
            return Ok(0);
        }

        let path = self.ledger_path(output_dir);
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| ledger_error(&path, e))?;
        file.lock_exclusive().map_err(|e| ledger_error(&path, e))?;

        let result = append_locked(&mut file, basenames);

        if let Err(e) = FileExt::unlock(&file) {
            warn!(path = %path.display(), error = %e, "failed to unlock reviewed ledger");
        }
        let written = result.map_err(|e| ledger_error(&path, e))?;
        if written > 0 {
            info!(path = %path.display(), added = written, "recorded reviewed images");
        }
        Ok(written)
    }
}

/// Read the current entries and append the missing ones, under the caller's lock
fn append_locked(file: &mut fs::File, basenames: &[String]) -> std::io::Result<usize> {
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    let mut existing = parse_entries(&content);

    let mut buffer = String::new();
    if !content.is_empty() && !content.ends_with('\n') {
        buffer.push('\n');
    }
    let mut written = 0;
    for name in basenames {
        let name = name.trim();
        if name.is_empty() || !existing.insert(name.to_string()) {
            continue;
        }
        buffer.push_str(name);
        buffer.push('\n');
        written += 1;
    }

    if written > 0 {
        file.write_all(buffer.as_bytes())?;
        file.flush()?;
    }
    Ok(written)
}
