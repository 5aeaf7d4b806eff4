//! Persistence layer for monitor rows.
//!
//! This module provides:
//! - Row identifiers and the row written for a monitor ([`RowId`], [`MonitorRow`])
//! - The store abstraction the reconciler drives ([`MonitorStore`])
//! - The SQLite implementation over an Uptime Kuma database ([`SqliteStore`], [`connect`])
//!
//! The store never creates or migrates the schema. It expects a `monitor`
//! table with at least `id`, `name`, `type` and `parent` columns, plus one
//! column for every key a monitor declares.

mod error;
mod sqlite;

#[cfg(test)]
pub mod testing;

pub use error::StoreError;
pub use sqlite::{SqliteStore, connect};

use std::fmt;

use crate::tree::{FieldValue, Fields};

/// Name of the table holding groups and monitors.
pub const MONITOR_TABLE: &str = "monitor";

/// Well-known column names of the monitor table.
pub mod column {
    /// Primary key.
    pub const ID: &str = "id";
    /// Display name.
    pub const NAME: &str = "name";
    /// Monitor type (`group`, `http`, `ping`, ...).
    pub const TYPE: &str = "type";
    /// Identifier of the enclosing group.
    pub const PARENT: &str = "parent";

    /// Columns the reconciler cannot work without.
    pub const REQUIRED: [&str; 4] = [ID, NAME, TYPE, PARENT];
}

/// System-assigned identifier of a monitor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub i64);

impl RowId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The full column set written for one monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorRow {
    /// Row name (after variant suffixing).
    pub name: String,
    /// Enclosing group, `None` for top-level monitors.
    pub parent: Option<RowId>,
    /// Declared columns (after `$$IP$$` substitution).
    pub fields: Fields,
}

impl MonitorRow {
    /// Creates a row.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<RowId>, fields: Fields) -> Self {
        Self {
            name: name.into(),
            parent,
            fields,
        }
    }

    /// Returns the columns to write, `name` and `parent` first.
    ///
    /// `name` and `parent` always reflect the row's position in the tree,
    /// even if the declaration carries columns of the same name.
    #[must_use]
    pub fn columns(&self) -> Fields {
        let mut columns = Fields::new();
        columns.set(column::NAME, self.name.as_str());
        columns.set(column::PARENT, parent_value(self.parent));
        for (name, value) in self.fields.iter() {
            if name != column::NAME && name != column::PARENT {
                columns.set(name, value.clone());
            }
        }
        columns
    }
}

fn parent_value(parent: Option<RowId>) -> FieldValue {
    parent.map_or(FieldValue::Null, |id| FieldValue::Integer(id.get()))
}

/// Abstraction over the table the reconciler writes to.
///
/// Implementations must match a missing parent with "parent is null"
/// semantics, never with an equality comparison.
///
/// # Testing
///
/// Tests use the in-memory `mock::MemoryStore` to avoid a database.
pub trait MonitorStore {
    /// Looks up a group row by `(name, parent)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_group(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> impl Future<Output = Result<Option<RowId>, StoreError>>;

    /// Inserts a new group row and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_group(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> impl Future<Output = Result<RowId, StoreError>>;

    /// Looks up a non-group row by `(name, parent)`, whatever its type.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_monitor(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> impl Future<Output = Result<Option<RowId>, StoreError>>;

    /// Writes a monitor row.
    ///
    /// With `existing` set, that row keeps its identifier and is replaced in
    /// place: written columns take the new values and every other column
    /// returns to its table default. Otherwise a new row is inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if a column does not exist or the write fails.
    fn write_monitor(
        &mut self,
        existing: Option<RowId>,
        row: &MonitorRow,
    ) -> impl Future<Output = Result<RowId, StoreError>>;

    /// Sets the given columns on an existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if a column does not exist or the update fails.
    fn apply_defaults(
        &mut self,
        id: RowId,
        defaults: &Fields,
    ) -> impl Future<Output = Result<(), StoreError>>;
}
