//! Domain Services
//!
//! Stateless logic over domain entities:
//! - `NameCodec` - filename parsing and rendering
//! - `RenamePlanner` - canonical export renames and resequencing
//! - `completion` - the already-done rule for resumed runs

pub mod completion;
mod name_codec;
mod planner;

pub use name_codec::{NameCodec, ParsedName};
pub use planner::RenamePlanner;
