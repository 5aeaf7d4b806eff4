//! Tests for the run module.

use super::*;
use sqlx::Row;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = r"
    CREATE TABLE monitor (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(150),
        user_id INTEGER,
        interval INTEGER NOT NULL DEFAULT 20,
        url TEXT,
        type VARCHAR(20),
        hostname VARCHAR(255),
        retry_interval INTEGER NOT NULL DEFAULT 0,
        timeout DOUBLE DEFAULT 0,
        parent INTEGER REFERENCES monitor(id) ON DELETE SET NULL ON UPDATE CASCADE
    )
";

const DOCUMENT: &str = r"
monitors:
  web:
    type: group
    monitors:
      frontend:
        type: http
        url: 'http://$$IP$$/'
    ips:
      v4: 10.0.0.1
      v6: '[fd00::1]'
  standalone:
    type: ping
    hostname: example.com
";

struct Fixture {
    _dir: TempDir,
    config_file: PathBuf,
    database_file: PathBuf,
}

impl Fixture {
    async fn new(document: &str, schema: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("monitors.yaml");
        let database_file = dir.path().join("kuma.db");
        std::fs::write(&config_file, document).unwrap();

        let options = SqliteConnectOptions::new()
            .filename(&database_file)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
        if let Some(schema) = schema {
            sqlx::query(schema).execute(&mut conn).await.unwrap();
        }
        conn.close().await.unwrap();

        Self {
            _dir: dir,
            config_file,
            database_file,
        }
    }

    fn config(&self, dry_run: bool) -> ValidatedConfig {
        ValidatedConfig {
            config_file: self.config_file.clone(),
            database_file: self.database_file.clone(),
            dry_run,
            verbose: false,
        }
    }
}

async fn names(database: &Path) -> Vec<String> {
    let options = SqliteConnectOptions::new().filename(database);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    let rows = sqlx::query("SELECT name FROM monitor ORDER BY id")
        .fetch_all(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();
    rows.iter().map(|row| row.get("name")).collect()
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn writes_groups_and_monitors() {
        let fixture = Fixture::new(DOCUMENT, Some(SCHEMA)).await;

        let report = execute(&fixture.config(false)).await.unwrap();

        assert_eq!(report.groups_created, 1);
        assert_eq!(report.monitors_created, 3);
        assert_eq!(
            names(&fixture.database_file).await,
            ["web", "frontend", "frontend - v6", "standalone"]
        );
    }

    #[tokio::test]
    async fn second_run_updates_in_place() {
        let fixture = Fixture::new(DOCUMENT, Some(SCHEMA)).await;

        execute(&fixture.config(false)).await.unwrap();
        let report = execute(&fixture.config(false)).await.unwrap();

        assert_eq!(report.created(), 0);
        assert_eq!(report.groups_existing, 1);
        assert_eq!(report.monitors_updated, 3);
        assert_eq!(names(&fixture.database_file).await.len(), 4);
    }

    #[tokio::test]
    async fn dry_run_leaves_database_unchanged() {
        let fixture = Fixture::new(DOCUMENT, Some(SCHEMA)).await;

        let report = execute(&fixture.config(true)).await.unwrap();

        assert_eq!(report.created(), 4);
        assert!(names(&fixture.database_file).await.is_empty());
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn missing_table_is_store_error() {
        let fixture = Fixture::new(DOCUMENT, None).await;

        let result = execute(&fixture.config(false)).await;

        assert!(matches!(
            result,
            Err(RunError::Store(StoreError::MissingTable(_)))
        ));
    }

    #[tokio::test]
    async fn invalid_document_is_reported_before_database_access() {
        let fixture = Fixture::new("monitors: [not, a, mapping]", None).await;

        let result = execute(&fixture.config(false)).await;

        assert!(matches!(result, Err(RunError::Document(_))));
    }

    #[tokio::test]
    async fn missing_document_is_document_error() {
        let fixture = Fixture::new(DOCUMENT, Some(SCHEMA)).await;
        std::fs::remove_file(&fixture.config_file).unwrap();

        let result = execute(&fixture.config(false)).await;

        assert!(matches!(result, Err(RunError::Document(TreeError::FileRead { .. }))));
    }

    #[test]
    fn errors_display_their_source() {
        let error = RunError::from(StoreError::MissingTable("monitor"));
        assert_eq!(error.to_string(), StoreError::MissingTable("monitor").to_string());
    }
}
