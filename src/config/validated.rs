//! Validated configuration built from CLI arguments.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction,
//! before the database is opened.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::cli::Cli;
use super::error::{ConfigError, field, role};
use super::template::default_config_template;

const CONFIG_HINT: &str = "Use --config FILE to point at the YAML configuration (see --help)";
const DATABASE_HINT: &str = "Use --database FILE to point at the Uptime Kuma database (see --help)";

/// Fully validated configuration ready for use by the application.
///
/// Both paths exist and are regular files; the configuration file can be
/// read and the database file can be read and written.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// YAML configuration document
    pub config_file: PathBuf,

    /// Uptime Kuma SQLite database
    pub database_file: PathBuf,

    /// Roll back all changes at the end of the run
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ config: {}, database: {}, dry_run: {} }}",
            self.config_file.display(),
            self.database_file.display(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `--config` or `--database` is missing
    /// - A path does not exist or is not a regular file
    /// - The configuration file is not readable
    /// - The database file is not readable and writable
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config_file = cli
            .config
            .clone()
            .ok_or_else(|| ConfigError::missing(field::CONFIG, CONFIG_HINT))?;
        let database_file = cli
            .database
            .clone()
            .ok_or_else(|| ConfigError::missing(field::DATABASE, DATABASE_HINT))?;

        check_readable(role::CONFIG, &config_file)?;
        check_read_write(role::DATABASE, &database_file)?;

        Ok(Self {
            config_file,
            database_file,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }
}

/// Writes the example configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file already exists or cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    std::fs::write(path, default_config_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn check_regular_file(role: &'static str, path: &Path) -> Result<(), ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ConfigError::NotFound {
                role,
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::NotReadable {
                role,
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.is_file() {
        Ok(())
    } else {
        Err(ConfigError::NotAFile {
            role,
            path: path.to_path_buf(),
        })
    }
}

fn check_readable(role: &'static str, path: &Path) -> Result<(), ConfigError> {
    check_regular_file(role, path)?;

    File::open(path).map_err(|e| ConfigError::NotReadable {
        role,
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Opens the file for writing without truncating or creating it.
fn check_read_write(role: &'static str, path: &Path) -> Result<(), ConfigError> {
    check_readable(role, path)?;

    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| ConfigError::NotWritable {
            role,
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(())
}
