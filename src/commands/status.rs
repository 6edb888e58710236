//! `lotname status` / `lotname mark-reviewed`

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;

use lotname::application::{CompletionTracker, LotIndex};
use lotname::config::Config;
use lotname::domain::value_objects::LotId;
use lotname::infrastructure::LocalFs;

use crate::ui::json::emit;

pub fn cmd_status(
    input: &Path,
    output: &Path,
    config: &Config,
    reviewed: bool,
    json: bool,
) -> Result<()> {
    let tracker = CompletionTracker::new(LocalFs::new(), config.codec(), config.ledger_repository());
    let report = tracker.status(input, output, reviewed)?;

    if json {
        for status in &report.lots {
            emit(json!({
                "event": "lot_status",
                "command": "status",
                "lot": status.lot_id,
                "inputs": status.inputs,
                "outputs": status.outputs,
                "accounted_for": status.accounted_for,
                "done": status.done,
            }))?;
        }
        emit(json!({
            "event": "complete",
            "command": "status",
            "consult_ledger": report.consult_ledger,
            "done": report.done().count(),
            "pending": report.pending().count(),
        }))?;
        return Ok(());
    }

    for status in &report.lots {
        let state = if status.done { "done" } else { "pending" };
        println!(
            "{:<12} {:<8} {}/{} accounted for",
            status.lot_id.as_str(),
            state,
            status.accounted_for,
            status.inputs
        );
    }
    println!(
        "{} done, {} pending{}",
        report.done().count(),
        report.pending().count(),
        if reviewed { " (reviewed ledger consulted)" } else { "" }
    );
    Ok(())
}

pub fn cmd_mark_reviewed(
    input: &Path,
    output: &Path,
    lots: &[String],
    config: &Config,
    json: bool,
) -> Result<()> {
    let fs = LocalFs::new();
    let index = LotIndex::new(&fs, config.codec());
    let lot_ids: Vec<LotId> = lots.iter().map(|raw| LotId::new(raw.trim())).collect();
    for lot_id in &lot_ids {
        if index.scan_lot(input, lot_id).is_none() && index.scan_lot(output, lot_id).is_none() {
            bail!(
                "lot '{}' has no images in {} or {}",
                lot_id,
                input.display(),
                output.display()
            );
        }
    }

    let tracker = CompletionTracker::new(&fs, config.codec(), config.ledger_repository());
    let mut recorded = 0;
    for lot_id in &lot_ids {
        let added = tracker.mark_lot_reviewed(input, output, lot_id)?;
        recorded += added;
        if json {
            emit(json!({
                "event": "marked",
                "command": "mark-reviewed",
                "lot": lot_id,
                "recorded": added,
            }))?;
        }
    }

    if json {
        emit(json!({
            "event": "complete",
            "command": "mark-reviewed",
            "lots": lot_ids.len(),
            "recorded": recorded,
        }))?;
    } else {
        println!(
            "Marked {} lot(s) reviewed ({} new ledger entries)",
            lot_ids.len(),
            recorded
        );
    }
    Ok(())
}
