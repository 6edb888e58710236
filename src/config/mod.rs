//! Configuration module for lotname
//!
//! Configuration hierarchy:
//! 1. `--config <path>` (highest priority)
//! 2. Environment variables (LOTNAME_*), applied on top of whichever file wins
//! 3. Folder config (`<folder>/.lotname.toml`)
//! 4. User config (`<config dir>/lotname/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{discover, user_config_path, ConfigWarning, FOLDER_CONFIG_FILE};
pub use types::{Config, LedgerConfig, NamingConfig, RenameConfig};
