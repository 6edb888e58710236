//! `lotname export` - copy the output images of every lot into one folder

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use lotname::application::ReviewSession;
use lotname::config::Config;
use lotname::infrastructure::LocalFs;

use crate::ui::json::emit;

pub fn cmd_export(
    input: &Path,
    output: &Path,
    dest: &Path,
    config: &Config,
    json: bool,
) -> Result<()> {
    let session = ReviewSession::open(
        LocalFs::new(),
        config.ledger_repository(),
        config.planner(),
        input,
        output,
    )
    .with_temp_prefix(config.temp_prefix());

    let report = session
        .export_reviewed(dest)
        .with_context(|| format!("failed to export into {}", dest.display()))?;

    if json {
        for path in &report.copied {
            emit(json!({ "event": "copied", "command": "export", "path": path }))?;
        }
        for path in &report.skipped {
            emit(json!({ "event": "skipped", "command": "export", "path": path }))?;
        }
        emit(json!({
            "event": "complete",
            "command": "export",
            "destination": report.destination,
            "copied": report.copied.len(),
            "skipped": report.skipped.len(),
        }))?;
        return Ok(());
    }

    for path in &report.skipped {
        eprintln!("Skipped {} (already exists)", path.display());
    }
    println!(
        "Copied {} image(s) from {} lot(s) into {}",
        report.copied.len(),
        session.lots().len(),
        dest.display()
    );
    Ok(())
}
