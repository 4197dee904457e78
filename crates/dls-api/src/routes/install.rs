//! `POST /api/downloads/{id}/install` – trigger installation of a verified
//! download.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use dls_core::driver;
use dls_core::error::CoreError;
use dls_core::status::DownloadStatus;

use super::ActionReply;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn install(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ActionReply>> {
    let record = state.db.get(id).await?.ok_or(CoreError::NotFound(id))?;

    if record.status != DownloadStatus::Verified {
        return Err(CoreError::InvalidState(
            "Download must be verified before installation".to_string(),
        )
        .into());
    }

    state.db.set_status(id, DownloadStatus::Installing).await?;
    driver::spawn_install(state.db.clone(), state.cfg.clone(), id);
    tracing::info!(%id, "installation started");

    Ok(Json(ActionReply {
        message: "Installation started".to_string(),
        id,
    }))
}
