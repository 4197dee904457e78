//! `POST /api/downloads/{id}/pause` – request cooperative suspension.
//!
//! The live driver observes the token on its next tick, so the byte counter
//! freezes within one polling interval; the status label is set here so a
//! poll right after the request already reads `paused`.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use dls_core::error::CoreError;
use dls_core::status::DownloadStatus;

use super::ActionReply;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn pause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ActionReply>> {
    state.db.get(id).await?.ok_or(CoreError::NotFound(id))?;

    let signalled = state.control.request_pause(id);
    state.db.set_status(id, DownloadStatus::Paused).await?;
    tracing::info!(%id, signalled, "pause requested");

    Ok(Json(ActionReply {
        message: "Download paused".to_string(),
        id,
    }))
}
