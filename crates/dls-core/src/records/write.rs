//! Record write operations: insert, targeted field updates, remove.
//!
//! Every update also refreshes `updated_at`. The byte counter is clamped to
//! `total_size` at the SQL layer so the registry can never persist an
//! over-count regardless of caller arithmetic.

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::{now_iso, RecordDb};
use super::types::{DownloadRecord, NewDownload, ProgressUpdate};
use crate::progress::ETA_UNKNOWN;
use crate::status::{ChecksumStatus, DownloadStatus};

impl RecordDb {
    /// Insert a new record with a fresh id, `idle` status, and zeroed
    /// counters. Returns the record exactly as persisted.
    pub async fn insert(&self, new: &NewDownload) -> Result<DownloadRecord> {
        let now: DateTime<Utc> = Utc::now();
        let record = DownloadRecord {
            id: Uuid::new_v4(),
            filename: new.filename.clone(),
            total_size: new.total_size.max(0),
            downloaded_size: 0,
            progress: 0.0,
            status: DownloadStatus::Idle,
            speed: 0.0,
            eta: ETA_UNKNOWN.to_string(),
            checksum_status: ChecksumStatus::Pending,
            checksum_calculated: None,
            source_url: new.source_url.clone(),
            download_path: new.download_path.clone(),
            error_message: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO downloads (
                id, filename, total_size, downloaded_size, progress, status,
                speed, eta, checksum_status, checksum_calculated,
                source_url, download_path, error_message, created_at, updated_at
            ) VALUES (?1, ?2, ?3, 0, 0, ?4,
                      0, ?5, ?6, NULL,
                      ?7, ?8, NULL, ?9, ?10)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.filename)
        .bind(record.total_size)
        .bind(record.status.as_str())
        .bind(&record.eta)
        .bind(record.checksum_status.as_str())
        .bind(&record.source_url)
        .bind(&record.download_path)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Update only the lifecycle status (and `updated_at`).
    pub async fn set_status(&self, id: Uuid, status: DownloadStatus) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET status = ?1,
                updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(status.as_str())
        .bind(now_iso())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist one downloading tick: byte counter (clamped to the stored
    /// total), percent, rate, eta, and the `downloading` status label.
    pub async fn update_progress(&self, id: Uuid, update: &ProgressUpdate) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET downloaded_size = MIN(?1, total_size),
                progress = MIN(?2, 100.0),
                speed = ?3,
                eta = ?4,
                status = ?5,
                updated_at = ?6
            WHERE id = ?7
            "#,
        )
        .bind(update.downloaded_size)
        .bind(update.progress)
        .bind(update.speed)
        .bind(&update.eta)
        .bind(DownloadStatus::Downloading.as_str())
        .bind(now_iso())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Enter the verification phase: status `verifying`, checksum
    /// `calculating`.
    pub async fn mark_verifying(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET status = ?1,
                checksum_status = ?2,
                updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(DownloadStatus::Verifying.as_str())
        .bind(ChecksumStatus::Calculating.as_str())
        .bind(now_iso())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a successful verification: digest stored, checksum and status
    /// `verified`, progress forced to 100.
    pub async fn mark_verified(&self, id: Uuid, digest: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET status = ?1,
                checksum_status = ?2,
                checksum_calculated = ?3,
                progress = 100.0,
                eta = '00:00:00',
                updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(DownloadStatus::Verified.as_str())
        .bind(ChecksumStatus::Verified.as_str())
        .bind(digest)
        .bind(now_iso())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a background-task failure: status `error`, message captured.
    pub async fn mark_error(&self, id: Uuid, message: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET status = ?1,
                error_message = ?2,
                updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(DownloadStatus::Error.as_str())
        .bind(message)
        .bind(now_iso())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Permanently remove a record. Returns true if a row existed.
    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM downloads
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
