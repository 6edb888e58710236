//! lotname - lot-file naming and collision-free rename engine
//!
//! Auction photo folders hold one or more images per lot, named `6.jpg`,
//! `6(1).jpg`, `6_2.jpg` or `6-3.jpg`. This crate parses those names into
//! lots, plans the renames that give every lot a canonical position 1,
//! executes plans with a two-phase rename that survives chains and cycles,
//! and tracks which lots are already cropped and reviewed.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    AtomicRenamer, BatchRunner, CompletionTracker, LotIndex, NormalizeUseCase, ReviewSession,
};
pub use config::Config;
pub use domain::entities::{ImageAsset, Lot, RenameEntry, RenamePlan};
pub use domain::services::{NameCodec, ParsedName, RenamePlanner};
pub use domain::value_objects::{order_lot_ids, LotId, Scheme, SchemePreference};
pub use error::{LotError, LotResult};
pub use infrastructure::{LocalFs, TextLedgerRepository};
