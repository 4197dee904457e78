//! SQLite-backed registry implementation.
//!
//! Handles connection, migrations, and timestamp helpers. Record CRUD lives
//! in `read` / `write`.

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed download registry.
///
/// The database file lives under the XDG state directory by default:
/// `~/.local/state/dls/downloads.db`.
#[derive(Clone)]
pub struct RecordDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl RecordDb {
    /// Open (or create) the default registry and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("dls")?;
        let state_dir = xdg_dirs.get_state_home().join("dls");
        let db_path = state_dir.join("downloads.db");

        tokio::fs::create_dir_all(&state_dir).await?;

        let uri = path_to_sqlite_uri(&db_path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;

        let db = RecordDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open (or create) the registry at a specific path. Creates parent dirs
    /// if needed. Used when `DLS_DB_PATH` is set, and by on-disk tests.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let db = RecordDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open an in-memory registry (no disk I/O). Intended for tests.
    pub async fn open_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let db = RecordDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // Single-table schema: one row per download. Timestamps are RFC 3339
        // TEXT so the rows read back the way the API serves them.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS downloads (
                id TEXT PRIMARY KEY,
                filename TEXT NOT NULL,
                total_size INTEGER NOT NULL DEFAULT 0,
                downloaded_size INTEGER NOT NULL DEFAULT 0,
                progress REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                speed REAL NOT NULL DEFAULT 0,
                eta TEXT NOT NULL,
                checksum_status TEXT NOT NULL,
                checksum_calculated TEXT,
                source_url TEXT,
                download_path TEXT,
                error_message TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as an RFC 3339 string (for row timestamps). Pub for `write`.
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339()
}
