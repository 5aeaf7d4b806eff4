//! Shared SQLite fixtures for tests.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

/// A trimmed-down Uptime Kuma `monitor` table.
pub const MONITOR_SCHEMA: &str = r"
    CREATE TABLE monitor (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(150),
        active BOOLEAN NOT NULL DEFAULT 1,
        user_id INTEGER,
        interval INTEGER NOT NULL DEFAULT 20,
        url TEXT,
        type VARCHAR(20),
        weight INTEGER DEFAULT 2000,
        hostname VARCHAR(255),
        port INTEGER,
        maxretries INTEGER NOT NULL DEFAULT 0,
        retry_interval INTEGER NOT NULL DEFAULT 0,
        timeout DOUBLE DEFAULT 0,
        description TEXT,
        parent INTEGER REFERENCES monitor(id) ON DELETE SET NULL ON UPDATE CASCADE
    )
";

/// Opens an in-memory database holding an empty `monitor` table.
///
/// # Panics
///
/// Panics if the database cannot be created (only in test code).
pub async fn memory_db() -> SqliteConnection {
    let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    sqlx::query(MONITOR_SCHEMA).execute(&mut conn).await.unwrap();
    conn
}

/// Fetches a row by identifier.
///
/// # Panics
///
/// Panics if the row does not exist (only in test code).
pub async fn fetch_row(conn: &mut SqliteConnection, id: i64) -> SqliteRow {
    sqlx::query("SELECT * FROM monitor WHERE id = ?")
        .bind(id)
        .fetch_one(conn)
        .await
        .unwrap()
}

/// Counts all rows of the `monitor` table.
///
/// # Panics
///
/// Panics if the query fails (only in test code).
pub async fn count_rows(conn: &mut SqliteConnection) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM monitor")
        .fetch_one(conn)
        .await
        .unwrap()
}

/// Reads the text value of a column.
///
/// # Panics
///
/// Panics if the column does not exist or is not text (only in test code).
pub fn text(row: &SqliteRow, column: &str) -> Option<String> {
    row.try_get(column).unwrap()
}

/// Reads the integer value of a column.
///
/// # Panics
///
/// Panics if the column does not exist or is not an integer (only in test code).
pub fn int(row: &SqliteRow, column: &str) -> Option<i64> {
    row.try_get(column).unwrap()
}
