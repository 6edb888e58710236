//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod ledger;

pub use ledger::{TextLedgerRepository, DEFAULT_LEDGER_FILE};
