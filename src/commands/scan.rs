//! `lotname scan` - list the lots of a folder

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use lotname::application::{AtomicRenamer, LotIndex};
use lotname::config::Config;
use lotname::infrastructure::LocalFs;

use crate::ui::json::emit;

pub fn cmd_scan(folder: &Path, config: &Config, json: bool) -> Result<()> {
    let fs = LocalFs::new();
    let lots = LotIndex::new(&fs, config.codec()).scan(folder);
    let stale = AtomicRenamer::with_temp_prefix(&fs, config.temp_prefix()).stale_temp_files(folder);

    if json {
        for lot in lots.values() {
            emit(json!({
                "event": "lot",
                "command": "scan",
                "lot": lot.lot_id(),
                "files": lot.file_names(),
            }))?;
        }
        for path in &stale {
            emit(json!({
                "event": "stale_temp_file",
                "command": "scan",
                "path": path,
            }))?;
        }
        emit(json!({
            "event": "complete",
            "command": "scan",
            "folder": folder,
            "lots": lots.len(),
            "images": lots.values().map(|lot| lot.len()).sum::<usize>(),
        }))?;
        return Ok(());
    }

    if lots.is_empty() {
        println!("No lot images in {}", folder.display());
    }
    for lot in lots.values() {
        println!("{}: {}", lot.lot_id(), lot.file_names().join(", "));
    }
    if !stale.is_empty() {
        eprintln!(
            "Warning: {} staging file(s) left by an interrupted rename:",
            stale.len()
        );
        for path in &stale {
            eprintln!("  {}", path.display());
        }
        eprintln!("Run `lotname normalize` on the folder to restore them.");
    }
    Ok(())
}
