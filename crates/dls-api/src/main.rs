use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use dls_core::config::{self, ServerConfig};
use dls_core::logging;
use dls_core::records::RecordDb;

mod error;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unwritable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = run().await {
        eprintln!("dls-api error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let server_cfg = ServerConfig::from_env();
    let driver_cfg = config::load_or_init()?;

    let db = match &server_cfg.db_path {
        Some(path) => RecordDb::open_at(path).await?,
        None => RecordDb::open_default().await?,
    };

    let state = state::AppState::new(db, driver_cfg);
    let app = routes::router(state)
        .layer(cors_layer(&server_cfg))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&server_cfg.bind_addr).await?;
    tracing::info!("dls-api listening on {}", server_cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// CORS from `DLS_CORS_ORIGINS`. A `*` entry allows any origin (without
/// credentials, which tower-http refuses to combine with a wildcard);
/// an explicit origin list gets credentials.
fn cors_layer(cfg: &ServerConfig) -> CorsLayer {
    if cfg.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
