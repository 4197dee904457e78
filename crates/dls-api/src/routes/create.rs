//! `POST /api/downloads` – create a record from a source reference.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use dls_core::records::{DownloadRecord, NewDownload};
use dls_core::{probe, source};

use crate::error::ApiResult;
use crate::state::AppState;

/// Creation payload. Only the source reference is required; the rest is
/// resolved from the probe or defaulted.
#[derive(Debug, Deserialize)]
pub struct CreateDownload {
    pub source_url: String,
    pub filename: Option<String>,
    pub download_path: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateDownload>,
) -> ApiResult<Json<DownloadRecord>> {
    let direct_url = source::direct_download_url(&req.source_url);
    // Best-effort: an unreachable source falls back to the default size.
    let info = probe::fetch_info(&direct_url).await;

    let filename = req
        .filename
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            source::derive_filename(&direct_url, info.content_disposition.as_deref())
        });
    let total_size = info
        .content_length
        .map(|n| n as i64)
        .unwrap_or(state.cfg.default_total_size);

    let record = state
        .db
        .insert(&NewDownload {
            filename,
            total_size,
            source_url: Some(req.source_url),
            download_path: req.download_path,
        })
        .await?;

    tracing::info!(id = %record.id, filename = %record.filename, total_size, "download created");
    Ok(Json(record))
}
