use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
}

pub fn routes(config: AppConfig) -> Router {
    Router::new()
        .route("/alive", get(alive))
        .route("/version", get(version))
        .with_state(config)
}

/// GET /system/alive
async fn alive() -> &'static str {
    "OK"
}

/// GET /system/version
async fn version(State(config): State<AppConfig>) -> Json<VersionInfo> {
    Json(VersionInfo {
        version: config.server_version,
    })
}
