//! Command-line interface definition for clusterkit.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// clusterkit - Cluster registry for HPC web portals
///
/// Inspects which compute clusters a configuration file exposes and
/// which of them the current environment is permitted to use.
#[derive(Debug, Parser)]
#[command(name = "clusterkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the cluster configuration file
    #[arg(short, long, global = true, env = "CLUSTERKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the effective log level based on verbose/quiet flags.
    /// Returns: (level_name, is_quiet)
    pub fn log_level(&self) -> (&'static str, bool) {
        if self.quiet {
            return ("error", true);
        }

        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };

        (level, false)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List accessible clusters
    List(ListArgs),

    /// Show one cluster in detail
    Show(ShowArgs),

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include clusters the current environment is not permitted to use
    #[arg(short, long)]
    pub force: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the `show` subcommand.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Cluster name
    pub cluster: String,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file by constructing every cluster
    Validate,
}

/// Output format for list/show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}
