//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod lot_id;
mod scheme;

pub use lot_id::{order_lot_ids, LotId};
pub use scheme::{Scheme, SchemePreference};
