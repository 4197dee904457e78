//! Types stored in and read from the download registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{ChecksumStatus, DownloadStatus};

/// Full download record as persisted and served over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub id: Uuid,
    pub filename: String,
    pub total_size: i64,
    pub downloaded_size: i64,
    /// Percent in [0.0, 100.0], derived from the byte counters.
    pub progress: f64,
    pub status: DownloadStatus,
    /// Instantaneous transfer rate in bytes per second.
    pub speed: f64,
    /// `HH:MM:SS`, or `--:--:--` before a rate is known.
    pub eta: String,
    pub checksum_status: ChecksumStatus,
    /// Set only once `checksum_status` reaches `verified`.
    pub checksum_calculated: Option<String>,
    pub source_url: Option<String>,
    pub download_path: Option<String>,
    /// Set only in the `error` status.
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller supplies when creating a record; everything else is
/// defaulted by the registry (id, `idle` status, zeroed counters, timestamps).
#[derive(Debug, Clone)]
pub struct NewDownload {
    pub filename: String,
    pub total_size: i64,
    pub source_url: Option<String>,
    pub download_path: Option<String>,
}

/// One downloading tick's worth of counter updates.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub downloaded_size: i64,
    pub progress: f64,
    pub speed: f64,
    pub eta: String,
}
