//! Error types for lotname
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.
//!
//! A filename that fits no naming scheme is not an error (it is simply not
//! part of any lot), and a missing folder is recovered by the scanner as an
//! empty result, so neither has a variant here.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for lotname operations
pub type LotResult<T> = Result<T, LotError>;

/// Main error type for lotname operations
#[derive(Error, Debug)]
pub enum LotError {
    /// Two sources in one rename plan share a destination
    #[error(
        "rename plan conflict: '{}' and '{}' both target '{}'",
        first.display(),
        second.display(),
        destination.display()
    )]
    PlanConflict {
        destination: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// A source appears twice in one rename plan
    #[error("rename plan lists '{}' as a source more than once", source_path.display())]
    DuplicateSource { source_path: PathBuf },

    /// A destination is an existing file that the plan does not move away
    #[error("rename plan would overwrite '{}', which is not moved by the plan", destination.display())]
    OccupiedDestination { destination: PathBuf },

    /// A move during rename failed; the folder may be half-renamed and should be re-scanned
    #[error("failed to rename '{}' to '{}': {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: FsError,
    },

    /// Removing an asset failed
    #[error("failed to remove '{}': {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Copying an asset failed
    #[error("failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: FsError,
    },

    /// Reviewed ledger could not be read or appended
    #[error("reviewed ledger {}: {message}", path.display())]
    Ledger { path: PathBuf, message: String },

    /// Lot is not part of the current review session
    #[error("unknown lot '{lot}'")]
    UnknownLot { lot: String },

    /// Asset index outside the lot's asset list
    #[error("lot '{lot}' has {len} image(s), index {index} is out of range")]
    AssetOutOfRange { lot: String, index: usize, len: usize },

    /// The cropping collaborator failed on one image
    #[error("failed to crop '{}': {message}", path.display())]
    Crop { path: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
