//! Route table, one handler file per operation.

mod create;
mod install;
mod pause;
mod query;
mod remove;
mod start;

#[cfg(test)]
mod tests;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

/// Reply body for lifecycle actions (start, pause, resume, install, delete).
#[derive(Debug, Serialize)]
pub struct ActionReply {
    pub message: String,
    pub id: Uuid,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/downloads", post(create::create).get(query::list))
        .route(
            "/api/downloads/{id}",
            get(query::get_one).delete(remove::remove),
        )
        .route("/api/downloads/{id}/start", post(start::start))
        .route("/api/downloads/{id}/pause", post(pause::pause))
        .route("/api/downloads/{id}/resume", post(start::resume))
        .route("/api/downloads/{id}/install", post(install::install))
        .with_state(state)
}

/// Liveness / info endpoint.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Download Lifecycle Service API" }))
}
