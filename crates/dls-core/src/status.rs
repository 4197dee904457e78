//! Closed status types for the download lifecycle.
//!
//! Statuses are stored as strings in the database and on the wire, but the
//! core only ever handles the closed enums below, so an illegal label is a
//! construction-time failure rather than something that leaks into handlers.

use serde::{Deserialize, Serialize};

/// Pipeline position of a download record.
///
/// Transitions are monotonic along the pipeline except for the
/// `Paused` ⇄ `Downloading` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Idle,
    FetchingInfo,
    Downloading,
    Paused,
    Verifying,
    Verified,
    Extracting,
    Installing,
    Completed,
    Error,
}

impl DownloadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DownloadStatus::Idle => "idle",
            DownloadStatus::FetchingInfo => "fetching_info",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Paused => "paused",
            DownloadStatus::Verifying => "verifying",
            DownloadStatus::Verified => "verified",
            DownloadStatus::Extracting => "extracting",
            DownloadStatus::Installing => "installing",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "idle" => DownloadStatus::Idle,
            "fetching_info" => DownloadStatus::FetchingInfo,
            "downloading" => DownloadStatus::Downloading,
            "paused" => DownloadStatus::Paused,
            "verifying" => DownloadStatus::Verifying,
            "verified" => DownloadStatus::Verified,
            "extracting" => DownloadStatus::Extracting,
            "installing" => DownloadStatus::Installing,
            "completed" => DownloadStatus::Completed,
            _ => DownloadStatus::Error,
        }
    }
}

/// Verification progress for a download's checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumStatus {
    Pending,
    Calculating,
    Verified,
}

impl ChecksumStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumStatus::Pending => "pending",
            ChecksumStatus::Calculating => "calculating",
            ChecksumStatus::Verified => "verified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => ChecksumStatus::Pending,
            "calculating" => ChecksumStatus::Calculating,
            _ => ChecksumStatus::Verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_status_string_roundtrip() {
        let all = [
            DownloadStatus::Idle,
            DownloadStatus::FetchingInfo,
            DownloadStatus::Downloading,
            DownloadStatus::Paused,
            DownloadStatus::Verifying,
            DownloadStatus::Verified,
            DownloadStatus::Extracting,
            DownloadStatus::Installing,
            DownloadStatus::Completed,
            DownloadStatus::Error,
        ];
        for status in all {
            assert_eq!(DownloadStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_maps_to_error() {
        assert_eq!(DownloadStatus::from_str("exploded"), DownloadStatus::Error);
        assert_eq!(DownloadStatus::from_str(""), DownloadStatus::Error);
    }

    #[test]
    fn checksum_status_string_roundtrip() {
        for status in [
            ChecksumStatus::Pending,
            ChecksumStatus::Calculating,
            ChecksumStatus::Verified,
        ] {
            assert_eq!(ChecksumStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let s = serde_json::to_string(&DownloadStatus::FetchingInfo).unwrap();
        assert_eq!(s, "\"fetching_info\"");
    }
}
