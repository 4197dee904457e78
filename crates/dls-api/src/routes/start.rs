//! `POST /api/downloads/{id}/start` and `…/resume` – spawn the lifecycle
//! driver, resuming from the persisted byte counter.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use dls_core::driver;
use dls_core::error::CoreError;

use super::ActionReply;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ActionReply>> {
    run_driver(state, id, "Download started").await
}

pub async fn resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ActionReply>> {
    run_driver(state, id, "Download resumed").await
}

async fn run_driver(state: AppState, id: Uuid, message: &str) -> ApiResult<Json<ActionReply>> {
    state.db.get(id).await?.ok_or(CoreError::NotFound(id))?;
    driver::spawn_lifecycle(&state.db, &state.control, &state.cfg, id).await?;
    tracing::info!(%id, "lifecycle driver spawned");
    Ok(Json(ActionReply {
        message: message.to_string(),
        id,
    }))
}
