//! Error types for store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for store operations.
///
/// None of these are handled locally; they abort the reconciliation run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open the database file.
    #[error("Failed to open database '{}': {source}", path.display())]
    Open {
        /// Path to the database file
        path: PathBuf,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A statement failed.
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),

    /// The expected table does not exist.
    #[error("Table '{0}' does not exist in the database")]
    MissingTable(&'static str),

    /// A column the reconciler relies on is missing from the table.
    #[error("Table 'monitor' has no '{0}' column")]
    MissingColumn(&'static str),

    /// A row references a column the table does not have.
    #[error("Monitor '{row}' sets unknown column '{column}'")]
    UnknownColumn {
        /// Name (or identifier) of the row being written
        row: String,
        /// The column that does not exist
        column: String,
    },
}
