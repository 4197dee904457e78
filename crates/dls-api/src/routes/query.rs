//! `GET /api/downloads` and `GET /api/downloads/{id}` – pure reads.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use dls_core::error::CoreError;
use dls_core::records::DownloadRecord;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<DownloadRecord>>> {
    let limit = params.limit.unwrap_or(state.cfg.list_limit);
    Ok(Json(state.db.list(limit).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DownloadRecord>> {
    let record = state.db.get(id).await?.ok_or(CoreError::NotFound(id))?;
    Ok(Json(record))
}
