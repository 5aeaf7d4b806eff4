//! Reconciliation of a configuration tree against a [`MonitorStore`].
//!
//! The walk is depth-first and strictly sequential: a group's row must
//! exist before its children can reference it as their parent. Each node is
//! identified by `(name, parent)` (plus `type = group` for groups), never by
//! position, so re-running with an unchanged tree rewrites the same rows.
//!
//! Rows that disappeared from the tree are left alone.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;


use std::fmt;
use std::pin::Pin;

use crate::config::defaults;
use crate::store::{MonitorRow, MonitorStore, RowId, StoreError};
use crate::tree::{ConfigNode, ConfigTree, Fields, IpSet, NodeKind, expand_variants};

/// Counts of what a reconciliation run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Groups inserted by this run.
    pub groups_created: usize,
    /// Groups that already existed.
    pub groups_existing: usize,
    /// Monitor rows inserted by this run.
    pub monitors_created: usize,
    /// Monitor rows that already existed and were rewritten.
    pub monitors_updated: usize,
}

impl ReconcileReport {
    /// Returns the number of rows inserted.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.groups_created + self.monitors_created
    }

    /// Returns the number of rows touched, created or not.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.created() + self.groups_existing + self.monitors_updated
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "groups: {} created, {} existing; monitors: {} created, {} updated",
            self.groups_created, self.groups_existing, self.monitors_created, self.monitors_updated,
        )
    }
}

/// Reconciles the whole tree against the store.
///
/// Store errors are not handled here: the first one aborts the walk and
/// rows written before it stay written.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised by the store.
pub async fn reconcile<S: MonitorStore>(
    store: &mut S,
    tree: &ConfigTree,
) -> Result<ReconcileReport, StoreError> {
    let mut reconciler = Reconciler::new(store);
    reconciler.walk(&tree.nodes, None, tree.ips.as_ref()).await?;
    Ok(reconciler.report)
}

/// Walk state threaded through the recursion.
struct Reconciler<'s, S> {
    store: &'s mut S,
    defaults: Fields,
    report: ReconcileReport,
}

impl<'s, S: MonitorStore> Reconciler<'s, S> {
    fn new(store: &'s mut S) -> Self {
        Self {
            store,
            defaults: defaults::row_defaults(),
            report: ReconcileReport::default(),
        }
    }

    /// Visits sibling nodes in document order.
    ///
    /// `parent` is the row of the enclosing group; `inherited` is the IP set
    /// of the nearest ancestor that declared one.
    fn walk<'a>(
        &'a mut self,
        nodes: &'a [ConfigNode],
        parent: Option<RowId>,
        inherited: Option<&'a IpSet>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + 'a>>
    where
        's: 'a,
        S: 'a,
    {
        Box::pin(async move {
            for node in nodes {
                let ips = node.effective_ips(inherited);
                match &node.kind {
                    NodeKind::Group { children } => {
                        let id = self.resolve_or_create_group(&node.name, parent).await?;
                        self.walk(children, Some(id), ips).await?;
                    }
                    NodeKind::Monitor { fields } => {
                        self.resolve_or_upsert_monitor(&node.name, fields, parent, ips)
                            .await?;
                    }
                }
            }
            Ok(())
        })
    }

    /// Returns the identifier of the group row, creating it if needed.
    ///
    /// Existing groups are not modified.
    async fn resolve_or_create_group(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> Result<RowId, StoreError> {
        if let Some(id) = self.store.find_group(name, parent).await? {
            tracing::debug!("Group '{name}' exists ({id})");
            self.report.groups_existing += 1;
            return Ok(id);
        }

        let id = self.store.insert_group(name, parent).await?;
        self.store.apply_defaults(id, &self.defaults).await?;
        tracing::info!("Created group '{name}' ({id})");
        self.report.groups_created += 1;
        Ok(id)
    }

    /// Writes one row per IP variant of a monitor declaration.
    async fn resolve_or_upsert_monitor(
        &mut self,
        name: &str,
        fields: &Fields,
        parent: Option<RowId>,
        ips: Option<&IpSet>,
    ) -> Result<(), StoreError> {
        for (row_name, row_fields) in expand_variants(name, fields, ips) {
            self.upsert_monitor(MonitorRow::new(row_name, parent, row_fields))
                .await?;
        }
        Ok(())
    }

    /// Inserts or rewrites a single monitor row, then fills in defaults.
    ///
    /// Defaults only cover columns the declaration leaves unset.
    async fn upsert_monitor(&mut self, row: MonitorRow) -> Result<RowId, StoreError> {
        let existing = self.store.find_monitor(&row.name, row.parent).await?;
        let id = self.store.write_monitor(existing, &row).await?;

        let defaults = self.defaults.without(&row.fields);
        self.store.apply_defaults(id, &defaults).await?;

        if existing.is_some() {
            tracing::debug!("Updated monitor '{}' ({id})", row.name);
            self.report.monitors_updated += 1;
        } else {
            tracing::info!("Created monitor '{}' ({id})", row.name);
            self.report.monitors_created += 1;
        }
        Ok(id)
    }
}
