//! Application execution logic.
//!
//! This module contains the top-level async routine: load the document,
//! open the database, reconcile, close the database.

use sqlx::Connection;
use sqlx::sqlite::SqliteConnection;
use thiserror::Error;

use kuma_provision::config::ValidatedConfig;
use kuma_provision::reconcile::{ReconcileReport, reconcile};
use kuma_provision::store::{self, SqliteStore, StoreError};
use kuma_provision::tree::{ConfigTree, TreeError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration document could not be loaded.
    #[error(transparent)]
    Document(#[from] TreeError),

    /// A database operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Executes one reconciliation run.
///
/// This function:
/// 1. Parses the configuration document
/// 2. Opens a single connection to the database
/// 3. Walks the tree, writing groups and monitors
/// 4. Closes the connection, whether or not the walk succeeded
///
/// In dry-run mode the walk runs inside a transaction that is rolled back.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration document cannot be read or is invalid
/// - The database cannot be opened or lacks the `monitor` table
/// - Any statement fails during the walk
pub async fn execute(config: &ValidatedConfig) -> Result<ReconcileReport, RunError> {
    let tree = ConfigTree::load(&config.config_file)?;
    let (groups, monitors) = tree.count();
    tracing::info!(
        "Loaded {groups} group(s) and {monitors} monitor declaration(s) from {}",
        config.config_file.display()
    );

    let mut conn = store::connect(&config.database_file).await?;
    let result = reconcile_on(&mut conn, &tree, config.dry_run).await;

    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database: {e}");
    }

    let report = result?;
    if config.dry_run {
        tracing::info!(
            "Dry-run complete, {} row(s) touched and rolled back ({report})",
            report.total()
        );
    } else {
        tracing::info!("Reconciliation complete, {} row(s) touched ({report})", report.total());
    }
    Ok(report)
}

/// Reconciles on an open connection, optionally inside a rolled-back transaction.
async fn reconcile_on(
    conn: &mut SqliteConnection,
    tree: &ConfigTree,
    dry_run: bool,
) -> Result<ReconcileReport, StoreError> {
    if !dry_run {
        let mut store = SqliteStore::attach(conn).await?;
        return reconcile(&mut store, tree).await;
    }

    let mut tx = conn.begin().await?;
    let report = {
        let mut store = SqliteStore::attach(&mut tx).await?;
        reconcile(&mut store, tree).await?
    };
    tx.rollback().await?;
    Ok(report)
}
