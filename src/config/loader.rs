//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::Scheme;
use crate::error::{LotError, LotResult};

use super::types::Config;

/// Per-folder config file name
pub const FOLDER_CONFIG_FILE: &str = ".lotname.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> LotResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| LotError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LotError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    validate(&config, path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

fn validate(config: &Config, path: &Path) -> LotResult<()> {
    let invalid = |message: &str| LotError::InvalidConfig {
        file: path.to_path_buf(),
        message: message.to_string(),
    };

    let file_name = config.ledger.file_name.trim();
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return Err(invalid("ledger.file_name must be a plain file name"));
    }
    if config.rename.temp_prefix.is_empty() {
        return Err(invalid("rename.temp_prefix must not be empty"));
    }
    // A prefix starting with a digit could render a staging name that parses as a lot image
    if config
        .rename
        .temp_prefix
        .starts_with(|c: char| c.is_ascii_digit())
    {
        return Err(invalid("rename.temp_prefix must not start with a digit"));
    }
    Ok(())
}

/// First config file that applies to `folder`: the folder's own
/// `.lotname.toml`, then the user config.
pub fn discover(folder: Option<&Path>) -> Option<PathBuf> {
    folder
        .map(|f| f.join(FOLDER_CONFIG_FILE))
        .filter(|p| p.is_file())
        .or_else(|| user_config_path().filter(|p| p.is_file()))
}

/// User-level config path (`<config dir>/lotname/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lotname").join("config.toml"))
}

/// Load from folder config, user config, or defaults
pub fn load_or_default(folder: Option<&Path>) -> Config {
    if let Some(path) = discover(folder) {
        match Config::load(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                return with_env_overrides(config);
            }
            Err(e) => warn!(error = %e, "ignoring unreadable config"),
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (LOTNAME_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides looked up through `var`
pub(crate) fn with_overrides_from<F>(mut config: Config, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // LOTNAME_PAREN_SPACE
    if let Some(val) = var("LOTNAME_PAREN_SPACE") {
        config.naming.paren_space = matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes");
    }

    // LOTNAME_DEFAULT_SCHEME
    if let Some(scheme) = var("LOTNAME_DEFAULT_SCHEME").and_then(|s| Scheme::from_name(&s)) {
        config.naming.default_scheme = scheme;
    }

    // LOTNAME_SCHEME_PREFERENCE (comma-separated)
    if let Some(list) = var("LOTNAME_SCHEME_PREFERENCE") {
        let parsed: Vec<Scheme> = list.split(',').filter_map(Scheme::from_name).collect();
        if !parsed.is_empty() {
            config.naming.scheme_preference = parsed;
        }
    }

    // LOTNAME_LEDGER_FILE
    if let Some(name) = var("LOTNAME_LEDGER_FILE") {
        let name = name.trim();
        if !name.is_empty() && !name.contains(['/', '\\']) {
            config.ledger.file_name = name.to_string();
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "naming",
        "scheme_preference",
        "default_scheme",
        "paren_space",
        "ledger",
        "file_name",
        "rename",
        "temp_prefix",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
