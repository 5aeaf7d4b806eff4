//! Error types for command-line validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers missing arguments, unusable input paths and template writing.
/// All of these are detected before the database is opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required argument.
    #[error("Missing required argument: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing argument
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A path does not exist.
    #[error("{role} file '{}' does not exist", path.display())]
    NotFound {
        /// Which input the path was given for
        role: &'static str,
        /// The offending path
        path: PathBuf,
    },

    /// A path exists but is not a regular file.
    #[error("{role} file '{}' is not a regular file", path.display())]
    NotAFile {
        /// Which input the path was given for
        role: &'static str,
        /// The offending path
        path: PathBuf,
    },

    /// A file cannot be opened for reading.
    #[error("{role} file '{}' is not readable: {source}", path.display())]
    NotReadable {
        /// Which input the path was given for
        role: &'static str,
        /// The offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file cannot be opened for writing.
    #[error("{role} file '{}' is not writable: {source}", path.display())]
    NotWritable {
        /// Which input the path was given for
        role: &'static str,
        /// The offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Refusing to overwrite an existing file (for init command).
    #[error("File '{}' already exists", path.display())]
    AlreadyExists {
        /// Path that already exists
        path: PathBuf,
    },

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Well-known argument names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The configuration file argument.
    pub const CONFIG: &str = "--config";
    /// The database file argument.
    pub const DATABASE: &str = "--database";
}

/// Well-known input roles used in path errors.
pub mod role {
    /// The YAML configuration file.
    pub const CONFIG: &str = "Config";
    /// The SQLite database file.
    pub const DATABASE: &str = "Database";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required argument.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
