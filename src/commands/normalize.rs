//! `lotname plan` / `lotname normalize`

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;

use lotname::application::{NormalizeReport, NormalizeUseCase};
use lotname::config::Config;
use lotname::infrastructure::LocalFs;

use crate::ui::json::emit;

/// Normalize `folder`, or only print the plans when `dry_run` is set
pub fn cmd_normalize(folder: &Path, config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let command = if dry_run { "plan" } else { "normalize" };
    let use_case = NormalizeUseCase::new(LocalFs::new(), config.planner(), config.temp_prefix());
    let report = use_case
        .normalize(folder, dry_run)
        .with_context(|| format!("failed to normalize {}", folder.display()))?;

    if json {
        emit_json(command, &report)?;
    } else {
        print_text(&report);
    }

    if !report.skipped.is_empty() {
        bail!(
            "{} lot(s) in {} could not be normalized",
            report.skipped.len(),
            folder.display()
        );
    }
    Ok(())
}

fn emit_json(command: &str, report: &NormalizeReport) -> Result<()> {
    for lot in &report.lots {
        for entry in lot.plan.iter() {
            emit(json!({
                "event": "rename",
                "command": command,
                "lot": lot.lot_id,
                "from": entry.from_name(),
                "to": entry.to_name(),
            }))?;
        }
    }
    for skipped in &report.skipped {
        emit(json!({
            "event": "skipped",
            "command": command,
            "lot": skipped.lot_id,
            "reason": skipped.reason,
        }))?;
    }
    emit(json!({
        "event": "complete",
        "command": command,
        "folder": report.folder,
        "scanned": report.scanned,
        "planned": report.planned(),
        "renamed": report.renamed,
        "recovered": report.recovered,
        "skipped": report.skipped.len(),
        "dry_run": report.dry_run,
    }))?;
    Ok(())
}

fn print_text(report: &NormalizeReport) {
    if report.recovered > 0 {
        println!(
            "Restored {} file(s) left staged by an earlier run",
            report.recovered
        );
    }
    for skipped in &report.skipped {
        eprintln!("Skipped lot {}: {}", skipped.lot_id, skipped.reason);
    }
    if report.is_clean() {
        println!(
            "{} lot(s) in {} already normalized",
            report.scanned,
            report.folder.display()
        );
        return;
    }

    if report.lots.is_empty() {
        return;
    }
    for lot in &report.lots {
        println!("{}:", lot.lot_id);
        for entry in lot.plan.iter() {
            println!("  {} -> {}", entry.from_name(), entry.to_name());
        }
    }

    if report.dry_run {
        println!(
            "{} rename(s) planned across {} lot(s) (dry run)",
            report.planned(),
            report.lots.len()
        );
    } else {
        println!(
            "Renamed {} file(s) across {} lot(s)",
            report.renamed,
            report.lots.len()
        );
    }
}
