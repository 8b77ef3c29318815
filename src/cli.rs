//! CLI argument parsing for blockdiff

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blockdiff - block-level differential backup between two file versions
#[derive(Parser, Debug)]
#[command(name = "blockdiff")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a signature file for V1 and a delta file describing V2
    Backup(BackupArgs),

    /// Rebuild V2 from V1 and a delta file
    Restore(RestoreArgs),

    /// Print the entries of a signature or delta file
    Inspect(InspectArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the backup command
#[derive(Parser, Debug)]
pub struct BackupArgs {
    /// Older version of the file
    pub v1: PathBuf,

    /// Newer version of the file
    pub v2: PathBuf,

    /// Chunk size in bytes [default: from config]
    pub chunk_size: Option<u32>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl BackupArgs {
    /// Resolve the effective chunk size: CLI argument overrides config file
    pub fn effective_chunk_size(&self) -> crate::error::Result<u32> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load().unwrap_or_default(),
        };
        Config::validate_chunk_size(self.chunk_size.unwrap_or(config.chunk_size))
    }
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Base version of the file
    pub v1: PathBuf,

    /// Delta file generated by a previous backup
    pub delta: PathBuf,

    /// Destination path for the rebuilt file
    pub dest: PathBuf,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Signature or delta file to print
    pub file: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the configuration file path
    #[arg(long)]
    pub path: bool,

    /// Create default configuration file
    #[arg(long)]
    pub init: bool,
}
