//! SQLite implementation of [`MonitorStore`].

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Row};

use crate::tree::{FieldValue, Fields, GROUP_TYPE};

use super::{MONITOR_TABLE, MonitorRow, MonitorStore, RowId, StoreError, column};

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const FIND_GROUP_UNDER: &str = "SELECT id FROM monitor \
     WHERE name = ? AND parent = ? AND type = 'group' ORDER BY id LIMIT 1";
const FIND_GROUP_TOP: &str = "SELECT id FROM monitor \
     WHERE name = ? AND parent IS NULL AND type = 'group' ORDER BY id LIMIT 1";
const FIND_MONITOR_UNDER: &str = "SELECT id FROM monitor \
     WHERE name = ? AND parent = ? AND type IS NOT 'group' ORDER BY id LIMIT 1";
const FIND_MONITOR_TOP: &str = "SELECT id FROM monitor \
     WHERE name = ? AND parent IS NULL AND type IS NOT 'group' ORDER BY id LIMIT 1";
const INSERT_GROUP: &str = "INSERT INTO monitor (name, type, parent) VALUES (?, ?, ?)";

/// Opens a single connection to an existing database file.
///
/// The file is never created. Statement logging is disabled; the
/// reconciler logs what it does itself.
///
/// # Errors
///
/// Returns [`StoreError::Open`] if the database cannot be opened.
pub async fn connect(path: &Path) -> Result<SqliteConnection, StoreError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false)
        .busy_timeout(BUSY_TIMEOUT)
        .disable_statement_logging();

    let conn = SqliteConnection::connect_with(&options)
        .await
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Opened database {}", path.display());
    Ok(conn)
}

/// Layout of one `monitor` column, as reported by `PRAGMA table_info`.
#[derive(Debug, Clone)]
struct ColumnInfo {
    /// Declared default, as an SQL expression.
    default: Option<String>,
    not_null: bool,
    primary_key: bool,
}

impl ColumnInfo {
    /// Expression giving the column the value a freshly inserted row would get.
    ///
    /// `None` for key columns and for `NOT NULL` columns without a default,
    /// which keep their current value.
    fn reset_expr(&self) -> Option<String> {
        if self.primary_key {
            return None;
        }
        match &self.default {
            Some(expr) => Some(format!("({expr})")),
            None if self.not_null => None,
            None => Some("NULL".to_string()),
        }
    }
}

/// [`MonitorStore`] over a borrowed SQLite connection.
///
/// Borrowing lets the caller decide the connection's lifecycle: a plain
/// connection commits every statement, a transaction can be rolled back
/// (dry-run).
#[derive(Debug)]
pub struct SqliteStore<'c> {
    conn: &'c mut SqliteConnection,
    columns: BTreeMap<String, ColumnInfo>,
}

impl<'c> SqliteStore<'c> {
    /// Attaches to a connection after checking the `monitor` table layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the table or one of its key columns is missing.
    pub async fn attach(conn: &'c mut SqliteConnection) -> Result<Self, StoreError> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", quote_ident(MONITOR_TABLE)))
            .fetch_all(&mut *conn)
            .await?;

        let columns = rows
            .iter()
            .map(|row| {
                let info = ColumnInfo {
                    default: row.try_get("dflt_value")?,
                    not_null: row.try_get::<i64, _>("notnull")? != 0,
                    primary_key: row.try_get::<i64, _>("pk")? != 0,
                };
                Ok((row.try_get::<String, _>("name")?, info))
            })
            .collect::<Result<BTreeMap<_, _>, sqlx::Error>>()?;

        if columns.is_empty() {
            return Err(StoreError::MissingTable(MONITOR_TABLE));
        }
        if let Some(missing) = column::REQUIRED.into_iter().find(|c| !columns.contains_key(*c)) {
            return Err(StoreError::MissingColumn(missing));
        }

        tracing::debug!("Table '{MONITOR_TABLE}' has {} columns", columns.len());
        Ok(Self { conn, columns })
    }

    /// Returns `true` if the table has the given column.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Assignments returning every column the row does not write to its default.
    fn reset_assignments(&self, written: &Fields) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(name, _)| !written.contains(name))
            .filter_map(|(name, info)| {
                info.reset_expr()
                    .map(|expr| format!("{} = {expr}", quote_ident(name)))
            })
            .collect()
    }

    fn check_columns(&self, row: &str, fields: &Fields) -> Result<(), StoreError> {
        match fields.columns().find(|c| !self.has_column(c)) {
            Some(unknown) => Err(StoreError::UnknownColumn {
                row: row.to_string(),
                column: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn find_id(
        &mut self,
        under: &'static str,
        top: &'static str,
        name: &str,
        parent: Option<RowId>,
    ) -> Result<Option<RowId>, StoreError> {
        let query = match parent {
            Some(parent) => sqlx::query_scalar::<Sqlite, i64>(under)
                .bind(name.to_string())
                .bind(parent.get()),
            None => sqlx::query_scalar::<Sqlite, i64>(top).bind(name.to_string()),
        };

        let id = query.fetch_optional(&mut *self.conn).await?;
        Ok(id.map(RowId))
    }
}

impl MonitorStore for SqliteStore<'_> {
    async fn find_group(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> Result<Option<RowId>, StoreError> {
        self.find_id(FIND_GROUP_UNDER, FIND_GROUP_TOP, name, parent)
            .await
    }

    async fn insert_group(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> Result<RowId, StoreError> {
        let result = sqlx::query(INSERT_GROUP)
            .bind(name.to_string())
            .bind(GROUP_TYPE)
            .bind(parent.map(RowId::get))
            .execute(&mut *self.conn)
            .await?;

        Ok(RowId(result.last_insert_rowid()))
    }

    async fn find_monitor(
        &mut self,
        name: &str,
        parent: Option<RowId>,
    ) -> Result<Option<RowId>, StoreError> {
        self.find_id(FIND_MONITOR_UNDER, FIND_MONITOR_TOP, name, parent)
            .await
    }

    async fn write_monitor(
        &mut self,
        existing: Option<RowId>,
        row: &MonitorRow,
    ) -> Result<RowId, StoreError> {
        let columns = row.columns();
        self.check_columns(&row.name, &columns)?;

        let sql = upsert_sql(&columns, &self.reset_assignments(&columns));
        let mut query = sqlx::query(&sql).bind(existing.map(RowId::get));
        for (_, value) in columns.iter() {
            query = bind_value(query, value);
        }

        let result = query.execute(&mut *self.conn).await?;
        Ok(existing.unwrap_or_else(|| RowId(result.last_insert_rowid())))
    }

    async fn apply_defaults(&mut self, id: RowId, defaults: &Fields) -> Result<(), StoreError> {
        if defaults.is_empty() {
            return Ok(());
        }
        self.check_columns(&id.to_string(), defaults)?;

        let assignments = defaults
            .columns()
            .map(|c| format!("{} = ?", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?",
            quote_ident(MONITOR_TABLE),
            quote_ident(column::ID),
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in defaults.iter() {
            query = bind_value(query, value);
        }
        query.bind(id.get()).execute(&mut *self.conn).await?;
        Ok(())
    }
}

/// Builds the insert-or-replace statement for a column set.
///
/// The first placeholder is the identifier; `NULL` lets SQLite assign one.
/// On an identifier conflict the row is replaced in place: written columns
/// take the new values and `resets` restore every other column. The row is
/// never deleted, so rows referencing it are left alone.
fn upsert_sql(columns: &Fields, resets: &[String]) -> String {
    let id = quote_ident(column::ID);
    let names: Vec<String> = columns.columns().map(quote_ident).collect();
    let placeholders = vec!["?"; names.len() + 1].join(", ");
    let updates = names
        .iter()
        .map(|n| format!("{n} = excluded.{n}"))
        .chain(resets.iter().cloned())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {table} ({id}, {names}) VALUES ({placeholders}) \
         ON CONFLICT({id}) DO UPDATE SET {updates}",
        table = quote_ident(MONITOR_TABLE),
        names = names.join(", "),
    )
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &FieldValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Bool(b) => query.bind(*b),
        FieldValue::Integer(i) => query.bind(*i),
        FieldValue::Real(r) => query.bind(*r),
        FieldValue::Text(s) => query.bind(s.clone()),
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
