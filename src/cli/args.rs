//! CLI argument definitions using clap
//!
//! Commands:
//! - shelfdb [shell]            interactive query shell (the default)
//! - shelfdb exec '<line>'      parse and run one command line, then exit
//!
//! `--config <path>` points at a JSON configuration file; `--data-dir`
//! overrides the configured dataset directory.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shelfdb - a single-user, file-backed flat-record store
#[derive(Parser, Debug)]
#[command(name = "shelfdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding dataset files (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive query shell
    Shell,

    /// Parse and execute a single command line, then exit
    Exec {
        /// The command line, e.g. "FIND pages >= 400"
        line: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
