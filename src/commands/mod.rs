//! Command handlers for the `lotname` binary

pub mod normalize;
pub mod review;
pub mod scan;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};

use lotname::config::{discover, Config};

/// Resolve the config for a command working on `folder`.
///
/// An explicit `--config` wins, then the folder's `.lotname.toml`, then the
/// user config. A file that exists but fails to load is an error here;
/// unknown keys are only reported.
pub fn load_config(explicit: Option<&Path>, folder: &Path) -> Result<Config> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| discover(Some(folder)));

    let config = match path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            for warning in warnings {
                eprintln!("Warning: {}", warning);
            }
            config
        }
        None => Config::default(),
    };

    Ok(config.with_env_overrides())
}
