//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, in-memory for tests)
//! - `repositories/` - Reviewed ledger

pub mod fs;
pub mod repositories;

pub use fs::LocalFs;
pub use repositories::TextLedgerRepository;
