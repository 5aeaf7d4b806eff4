//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// Kuma Provision: declarative monitor provisioning
///
/// Creates or updates the groups and monitors described in a YAML file
/// inside an Uptime Kuma SQLite database.
#[derive(Debug, Parser)]
#[command(name = "kuma-provision")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file in YAML format (required)
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the Uptime Kuma SQLite database (required)
    #[arg(long, short, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Apply changes inside a transaction and roll it back
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for kuma-provision
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an example configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::TEMPLATE_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
