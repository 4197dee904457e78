//! Tests for the registry (in-memory DB, plus one on-disk open).

use uuid::Uuid;

use crate::records::{NewDownload, ProgressUpdate, RecordDb};
use crate::status::{ChecksumStatus, DownloadStatus};

fn new_download(total_size: i64) -> NewDownload {
    NewDownload {
        filename: "bundle.zip".to_string(),
        total_size,
        source_url: Some("https://example.com/bundle.zip".to_string()),
        download_path: Some("downloads/bundle".to_string()),
    }
}

#[tokio::test]
async fn insert_defaults_to_idle() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1_000_000)).await.unwrap();

    assert_eq!(record.status, DownloadStatus::Idle);
    assert_eq!(record.checksum_status, ChecksumStatus::Pending);
    assert_eq!(record.downloaded_size, 0);
    assert_eq!(record.total_size, 1_000_000);
    assert_eq!(record.progress, 0.0);
    assert_eq!(record.eta, "--:--:--");
    assert!(record.checksum_calculated.is_none());
    assert!(record.error_message.is_none());

    // The persisted row reads back identically.
    let stored = db.get(record.id).await.unwrap().expect("record exists");
    assert_eq!(stored.id, record.id);
    assert_eq!(stored.filename, "bundle.zip");
    assert_eq!(stored.status, DownloadStatus::Idle);
    assert_eq!(stored.created_at, stored.updated_at);
}

#[tokio::test]
async fn get_unknown_returns_none() {
    let db = RecordDb::open_memory().await.unwrap();
    assert!(db.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_bounded_and_newest_first() {
    let db = RecordDb::open_memory().await.unwrap();
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(db.insert(&new_download(10)).await.unwrap().id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = db.list(100).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, ids[2]);
    assert_eq!(all[2].id, ids[0]);

    let bounded = db.list(2).await.unwrap();
    assert_eq!(bounded.len(), 2);
    assert_eq!(bounded[0].id, ids[2]);
}

#[tokio::test]
async fn update_progress_clamps_to_total() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1000)).await.unwrap();

    db.update_progress(
        record.id,
        &ProgressUpdate {
            downloaded_size: 250,
            progress: 25.0,
            speed: 500.0,
            eta: "00:00:01".to_string(),
        },
    )
    .await
    .unwrap();

    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.downloaded_size, 250);
    assert_eq!(stored.progress, 25.0);
    assert_eq!(stored.speed, 500.0);
    assert_eq!(stored.eta, "00:00:01");
    assert_eq!(stored.status, DownloadStatus::Downloading);

    // An over-count is clamped at the SQL layer.
    db.update_progress(
        record.id,
        &ProgressUpdate {
            downloaded_size: 2000,
            progress: 200.0,
            speed: 500.0,
            eta: "00:00:00".to_string(),
        },
    )
    .await
    .unwrap();

    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.downloaded_size, 1000);
    assert_eq!(stored.progress, 100.0);
}

#[tokio::test]
async fn updates_refresh_updated_at() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1000)).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    db.set_status(record.id, DownloadStatus::Downloading)
        .await
        .unwrap();

    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DownloadStatus::Downloading);
    assert!(stored.updated_at > record.updated_at);
    assert_eq!(stored.created_at, record.created_at);
}

#[tokio::test]
async fn verification_marks() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1000)).await.unwrap();

    db.mark_verifying(record.id).await.unwrap();
    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DownloadStatus::Verifying);
    assert_eq!(stored.checksum_status, ChecksumStatus::Calculating);
    assert!(stored.checksum_calculated.is_none());

    db.mark_verified(record.id, "abc123").await.unwrap();
    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DownloadStatus::Verified);
    assert_eq!(stored.checksum_status, ChecksumStatus::Verified);
    assert_eq!(stored.checksum_calculated.as_deref(), Some("abc123"));
    assert_eq!(stored.progress, 100.0);
    assert_eq!(stored.eta, "00:00:00");
}

#[tokio::test]
async fn mark_error_captures_message() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1000)).await.unwrap();

    db.mark_error(record.id, "store unreachable").await.unwrap();
    let stored = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DownloadStatus::Error);
    assert_eq!(stored.error_message.as_deref(), Some("store unreachable"));
}

#[tokio::test]
async fn remove_reports_existence() {
    let db = RecordDb::open_memory().await.unwrap();
    let record = db.insert(&new_download(1000)).await.unwrap();

    assert!(db.remove(record.id).await.unwrap());
    assert!(db.get(record.id).await.unwrap().is_none());
    assert!(!db.remove(record.id).await.unwrap());
    assert!(!db.remove(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn open_at_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state dir").join("downloads.db");

    let db = RecordDb::open_at(&path).await.unwrap();
    let record = db.insert(&new_download(42)).await.unwrap();
    drop(db);

    let reopened = RecordDb::open_at(&path).await.unwrap();
    let stored = reopened.get(record.id).await.unwrap().expect("row survived");
    assert_eq!(stored.total_size, 42);
}
