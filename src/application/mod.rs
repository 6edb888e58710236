//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain naming rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LotIndex` - Scan a folder into lots
//! - `AtomicRenamer` - Execute a rename plan in two phases
//! - `NormalizeUseCase` - Plan and apply canonical names for a whole folder
//! - `CompletionTracker` - Decide which lots are done; record reviews
//! - `ReviewSession` - Navigate, reorder, delete and export during review
//! - `BatchRunner` - Drive a cropping pass with progress and cancellation

pub mod batch;
pub mod completion;
pub mod index;
pub mod normalize;
pub mod rename;
pub mod review;

pub use batch::{BatchEvent, BatchJob, BatchRunner, BatchSummary, CancelToken, Cropper};
pub use completion::{CompletionReport, CompletionTracker, LotStatus};
pub use index::{all_lot_ids, LotIndex, LotMap};
pub use normalize::{LotNormalization, NormalizeReport, NormalizeUseCase, SkippedLot};
pub use rename::{AtomicRenamer, DEFAULT_TEMP_PREFIX};
pub use review::{ExportReport, ReviewPair, ReviewSession};
