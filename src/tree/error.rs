//! Error types for configuration document parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading a configuration document.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A node has a shape that cannot be mapped to a group or monitor.
    #[error("Invalid node '{path}': {reason}")]
    InvalidNode {
        /// Slash-separated names from the root to the offending node
        path: String,
        /// What is wrong with the node
        reason: String,
    },
}

impl TreeError {
    /// Creates an `InvalidNode` error.
    #[must_use]
    pub fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
