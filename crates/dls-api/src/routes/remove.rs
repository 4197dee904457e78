//! `DELETE /api/downloads/{id}` – remove a record and its control entry.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use dls_core::error::CoreError;

use super::ActionReply;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ActionReply>> {
    // Signal any live driver and drop its token first so the registry entry
    // never outlives the row.
    state.control.clear(id);

    if !state.db.remove(id).await? {
        return Err(CoreError::NotFound(id).into());
    }
    tracing::info!(%id, "download deleted");

    Ok(Json(ActionReply {
        message: "Download deleted".to_string(),
        id,
    }))
}
