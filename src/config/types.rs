//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::services::{NameCodec, RenamePlanner};
use crate::domain::value_objects::{Scheme, SchemePreference};
use crate::error::LotResult;
use crate::infrastructure::repositories::{TextLedgerRepository, DEFAULT_LEDGER_FILE};

use super::loader::{self, ConfigWarning};

/// Filename rendering and scheme policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Order in which indexed schemes win when a lot mixes them
    #[serde(default = "default_scheme_preference")]
    pub scheme_preference: Vec<Scheme>,

    /// Scheme for lots that have no indexed image yet
    #[serde(default = "default_scheme")]
    pub default_scheme: Scheme,

    /// Render `6 (1).jpg` instead of `6(1).jpg`
    #[serde(default)]
    pub paren_space: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            scheme_preference: default_scheme_preference(),
            default_scheme: default_scheme(),
            paren_space: false,
        }
    }
}

fn default_scheme_preference() -> Vec<Scheme> {
    vec![Scheme::Parenthesized, Scheme::Underscore, Scheme::Hyphen]
}

fn default_scheme() -> Scheme {
    Scheme::Parenthesized
}

/// Reviewed ledger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_file")]
    pub file_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            file_name: default_ledger_file(),
        }
    }
}

fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

/// Two-phase rename settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Prefix of staging names; must not look like a lot image
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            temp_prefix: default_temp_prefix(),
        }
    }
}

fn default_temp_prefix() -> String {
    crate::application::DEFAULT_TEMP_PREFIX.to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub rename: RenameConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> LotResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> LotResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from folder config, user config, or defaults
    pub fn load_or_default(folder: Option<&Path>) -> Self {
        loader::load_or_default(folder)
    }

    /// Apply environment variable overrides (LOTNAME_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn codec(&self) -> NameCodec {
        NameCodec::new(self.naming.paren_space)
    }

    pub fn scheme_preference(&self) -> SchemePreference {
        SchemePreference::new(
            self.naming.scheme_preference.clone(),
            self.naming.default_scheme,
        )
    }

    pub fn planner(&self) -> RenamePlanner {
        RenamePlanner::new(self.codec(), self.scheme_preference())
    }

    pub fn ledger_repository(&self) -> TextLedgerRepository {
        TextLedgerRepository::with_file_name(self.ledger.file_name.as_str())
    }

    pub fn temp_prefix(&self) -> &str {
        &self.rename.temp_prefix
    }
}
