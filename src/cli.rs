use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lotname - lot image naming and rename tool
#[derive(Parser, Debug)]
#[command(name = "lotname")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: <folder>/.lotname.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the lots in a folder and their images in display order
    Scan {
        /// Folder to scan
        folder: PathBuf,
    },

    /// Show the renames `normalize` would perform
    Plan {
        /// Output folder to inspect
        folder: PathBuf,
    },

    /// Give every lot in a folder a canonical position 1
    Normalize {
        /// Output folder to normalize
        folder: PathBuf,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which input lots are done and which are pending
    Status {
        /// Folder of original images
        input: PathBuf,

        /// Folder of cropped images
        output: PathBuf,

        /// Also require every image to be in the reviewed ledger
        #[arg(long)]
        reviewed: bool,
    },

    /// Record lots as reviewed in the output folder's ledger
    MarkReviewed {
        /// Folder of original images
        input: PathBuf,

        /// Folder of cropped images
        output: PathBuf,

        /// Lot ids to mark
        #[arg(required = true)]
        lots: Vec<String>,
    },

    /// Copy every output image into one folder, never overwriting
    Export {
        /// Folder of original images
        input: PathBuf,

        /// Folder of cropped images
        output: PathBuf,

        /// Destination folder
        dest: PathBuf,
    },
}
