//! Lifecycle driver: the background task advancing one download through
//! downloading → verifying → verified → extracting → installing → completed.
//!
//! Progress is simulated: each tick advances the byte counter by a fixed
//! percentage of the total, and the post-download phases are timed delays.
//! The pause token is checked once per tick, so a pause request takes effect
//! within one polling interval. A driver owns all writes to its record while
//! it runs; pause/resume handlers only touch the token and the status label.


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::checksum;
use crate::config::DriverConfig;
use crate::control::DriverControl;
use crate::error::CoreError;
use crate::progress::{self, ProgressSnapshot, ETA_UNKNOWN};
use crate::records::{ProgressUpdate, RecordDb};
use crate::status::DownloadStatus;

/// How the downloading phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadOutcome {
    Complete,
    Paused,
}

/// Registers a driver for `id`, marks the record `downloading`, and spawns
/// the lifecycle task resuming from the persisted byte counter.
///
/// Fails with `InvalidState` while a driver is already live for the id, so a
/// double start can never race two drivers on one record.
pub async fn spawn_lifecycle(
    db: &RecordDb,
    control: &Arc<DriverControl>,
    cfg: &DriverConfig,
    id: Uuid,
) -> Result<(), CoreError> {
    let pause = control
        .register(id)
        .ok_or_else(|| CoreError::InvalidState(format!("download {id} is already in progress")))?;

    // Label the record before the task runs so a poll right after the
    // request already sees `downloading`.
    if let Err(err) = db.set_status(id, DownloadStatus::Downloading).await {
        control.unregister(id);
        return Err(CoreError::Store(err));
    }

    let db = db.clone();
    let control = Arc::clone(control);
    let cfg = cfg.clone();
    tokio::spawn(run_lifecycle(db, control, cfg, id, pause));
    Ok(())
}

/// Task body: drive the pipeline, record any failure on the record itself,
/// and always release the control entry.
async fn run_lifecycle(
    db: RecordDb,
    control: Arc<DriverControl>,
    cfg: DriverConfig,
    id: Uuid,
    pause: Arc<AtomicBool>,
) {
    if let Err(err) = drive(&db, &cfg, id, &pause).await {
        tracing::error!(%id, "lifecycle driver failed: {err:#}");
        if let Err(err) = db.mark_error(id, &format!("{err:#}")).await {
            tracing::warn!(%id, "could not record driver error: {err:#}");
        }
    }
    control.unregister(id);
}

/// Full pipeline for one record. Returns early (Ok) when paused.
async fn drive(db: &RecordDb, cfg: &DriverConfig, id: Uuid, pause: &AtomicBool) -> Result<()> {
    if download_phase(db, cfg, id, pause).await? == DownloadOutcome::Paused {
        return Ok(());
    }
    verify_phase(db, cfg, id).await?;
    tokio::time::sleep(cfg.post_verify_delay()).await;
    finalize_phase(db, cfg, id).await
}

/// Simulated byte transfer. Each tick checks the pause token, advances the
/// counter by `step_percent` of the total (clamped), and persists progress,
/// rate, and eta.
async fn download_phase(
    db: &RecordDb,
    cfg: &DriverConfig,
    id: Uuid,
    pause: &AtomicBool,
) -> Result<DownloadOutcome> {
    let record = db
        .get(id)
        .await?
        .with_context(|| format!("download {id} vanished before its driver started"))?;

    let total = record.total_size.max(0);
    let mut downloaded = record.downloaded_size.clamp(0, total);
    let step = step_bytes(total, cfg.step_percent);
    let speed = step as f64 / cfg.tick().as_secs_f64().max(f64::EPSILON);

    while downloaded < total {
        if pause.load(Ordering::Relaxed) {
            db.set_status(id, DownloadStatus::Paused).await?;
            tracing::info!(%id, downloaded, "download paused");
            return Ok(DownloadOutcome::Paused);
        }

        downloaded = (downloaded + step).min(total);
        let snap = ProgressSnapshot {
            downloaded: downloaded as u64,
            total: total as u64,
        };
        let eta = progress::eta_secs(snap.remaining(), speed)
            .map(progress::format_hms)
            .unwrap_or_else(|| ETA_UNKNOWN.to_string());
        db.update_progress(
            id,
            &ProgressUpdate {
                downloaded_size: downloaded,
                progress: snap.percent(),
                speed,
                eta,
            },
        )
        .await?;

        tokio::time::sleep(cfg.tick()).await;
    }

    Ok(DownloadOutcome::Complete)
}

/// Simulated checksum verification over the (nonexistent) content.
async fn verify_phase(db: &RecordDb, cfg: &DriverConfig, id: Uuid) -> Result<()> {
    db.mark_verifying(id).await?;
    tokio::time::sleep(cfg.verify_delay()).await;

    let digest = checksum::simulated_digest(id);
    db.mark_verified(id, &digest).await?;
    tracing::debug!(%id, %digest, "download verified");
    Ok(())
}

/// Timed extraction and installation phases, then completion. Unconditional;
/// pause is not supported past verification.
async fn finalize_phase(db: &RecordDb, cfg: &DriverConfig, id: Uuid) -> Result<()> {
    db.set_status(id, DownloadStatus::Extracting).await?;
    tokio::time::sleep(cfg.extract_delay()).await;

    db.set_status(id, DownloadStatus::Installing).await?;
    tokio::time::sleep(cfg.install_delay()).await;

    db.set_status(id, DownloadStatus::Completed).await?;
    tracing::info!(%id, "download lifecycle completed");
    Ok(())
}

/// Spawns the finalizer behind the install endpoint: the record is already
/// labelled `installing`; after the configured delay it becomes `completed`.
pub fn spawn_install(db: RecordDb, cfg: DriverConfig, id: Uuid) {
    tokio::spawn(async move {
        if let Err(err) = run_install(&db, &cfg, id).await {
            tracing::error!(%id, "install finalizer failed: {err:#}");
            if let Err(err) = db.mark_error(id, &format!("{err:#}")).await {
                tracing::warn!(%id, "could not record install error: {err:#}");
            }
        }
    });
}

async fn run_install(db: &RecordDb, cfg: &DriverConfig, id: Uuid) -> Result<()> {
    tokio::time::sleep(cfg.finalize_delay()).await;
    db.set_status(id, DownloadStatus::Completed).await?;
    tracing::info!(%id, "installation completed");
    Ok(())
}

/// Bytes simulated per tick: `step_percent` of the total, at least one byte
/// so small downloads still make progress.
fn step_bytes(total: i64, step_percent: f64) -> i64 {
    ((total as f64 * step_percent / 100.0) as i64).max(1)
}
