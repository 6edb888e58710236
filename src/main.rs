//! lotname CLI - lot image naming and rename tool
//!
//! Usage: lotname <COMMAND>
//!
//! Commands:
//!   scan           List the lots in a folder
//!   plan           Show the renames normalize would perform
//!   normalize      Give every lot a canonical position 1
//!   status         Done vs pending lots
//!   mark-reviewed  Record lots in the reviewed ledger
//!   export         Copy output images into one folder

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::normalize::cmd_normalize;
use commands::review::cmd_export;
use commands::scan::cmd_scan;
use commands::status::{cmd_mark_reviewed, cmd_status};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let config = commands::load_config(cli.config.as_deref(), config_folder(&cli.command))?;

    match &cli.command {
        Commands::Scan { folder } => cmd_scan(folder, &config, cli.json),
        Commands::Plan { folder } => cmd_normalize(folder, &config, true, cli.json),
        Commands::Normalize { folder, dry_run } => {
            cmd_normalize(folder, &config, *dry_run, cli.json)
        }
        Commands::Status {
            input,
            output,
            reviewed,
        } => cmd_status(input, output, &config, *reviewed, cli.json),
        Commands::MarkReviewed {
            input,
            output,
            lots,
        } => cmd_mark_reviewed(input, output, lots, &config, cli.json),
        Commands::Export {
            input,
            output,
            dest,
        } => cmd_export(input, output, dest, &config, cli.json),
    }
}

/// Folder whose `.lotname.toml` applies to the command
fn config_folder(command: &Commands) -> &Path {
    match command {
        Commands::Scan { folder } | Commands::Plan { folder } | Commands::Normalize { folder, .. } => {
            folder.as_path()
        }
        Commands::Status { output, .. }
        | Commands::MarkReviewed { output, .. }
        | Commands::Export { output, .. } => output.as_path(),
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else if verbose > 0 {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("LOTNAME_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
