//! Record read operations: get and list.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::db::RecordDb;
use super::types::DownloadRecord;
use crate::status::{ChecksumStatus, DownloadStatus};

const RECORD_COLUMNS: &str = r#"
    id, filename, total_size, downloaded_size, progress, status,
    speed, eta, checksum_status, checksum_calculated,
    source_url, download_path, error_message, created_at, updated_at
"#;

fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("parse {field} timestamp: {raw:?}"))
}

fn record_from_row(row: &SqliteRow) -> Result<DownloadRecord> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str).with_context(|| format!("parse record id: {id_str:?}"))?;
    let status_str: String = row.get("status");
    let checksum_str: String = row.get("checksum_status");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(DownloadRecord {
        id,
        filename: row.get("filename"),
        total_size: row.get("total_size"),
        downloaded_size: row.get("downloaded_size"),
        progress: row.get("progress"),
        status: DownloadStatus::from_str(&status_str),
        speed: row.get("speed"),
        eta: row.get("eta"),
        checksum_status: ChecksumStatus::from_str(&checksum_str),
        checksum_calculated: row.get("checksum_calculated"),
        source_url: row.get("source_url"),
        download_path: row.get("download_path"),
        error_message: row.get("error_message"),
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}

impl RecordDb {
    /// Fetch one record by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<DownloadRecord>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM downloads
            WHERE id = ?1
            "#
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(record_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// List records, newest first, bounded by `limit`.
    pub async fn list(&self, limit: i64) -> Result<Vec<DownloadRecord>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM downloads
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#
        ))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(record_from_row(&row)?);
        }
        Ok(out)
    }
}
