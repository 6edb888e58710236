//! Domain Layer
//!
//! Pure lot-naming logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - ImageAsset, Lot, RenamePlan
//! - `value_objects/` - LotId, Scheme, SchemePreference
//! - `services/` - NameCodec, RenamePlanner, completion rule
//! - `ports/` - FileSystem and LedgerRepository traits

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
