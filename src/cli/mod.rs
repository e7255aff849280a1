//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no ledger logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::infra::dirs::{FalcondagDirs, ENV_DATA_DIR};
use commands::Commands;

/// Falcondag - post-quantum signed transaction DAG ledger
///
/// Sign transfers with Falcon, link them into a DAG, and track balances.
#[derive(Parser, Debug)]
#[command(name = "falcondag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and requested values
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding config, ledger and keys
    #[arg(long, global = true, env = ENV_DATA_DIR, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            let dirs = FalcondagDirs::resolve(self.data_dir);
            tracing::debug!("Using data directory {}", dirs.data_dir().display());
            cmd.run(&dirs).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
