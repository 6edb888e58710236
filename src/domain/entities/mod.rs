//! Domain Entities
//!
//! - `ImageAsset` - one parsed lot image
//! - `Lot` - the assets of one lot in display order
//! - `RenamePlan` - moves that bring a lot to canonical names

mod image_asset;
mod lot;
mod rename_plan;

pub use image_asset::ImageAsset;
pub use lot::Lot;
pub use rename_plan::{RenameEntry, RenamePlan};
