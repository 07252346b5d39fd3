//! Common routes: health, readiness, version and info, plus the `/api/test` greeting.

use crate::config::StorageBackend;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if state.ping().await.is_err() {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Serialize)]
struct InfoBody {
    name: &'static str,
    version: &'static str,
    app: String,
    storage: StorageBackend,
}

/// Build identity plus the running instance's application name and store.
async fn info(State(state): State<AppState>) -> Json<InfoBody> {
    Json(InfoBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        app: state.alerts.app_name().to_string(),
        storage: state.storage,
    })
}

async fn greeting() -> &'static str {
    "Hello Test"
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// Common routes plus the stateful ones: GET /ready (store check) and GET /info.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/info", get(info))
        .with_state(state)
        .merge(common_routes())
}

/// GET /test (mounted under /api).
pub fn greeting_routes() -> Router {
    Router::new().route("/test", get(greeting))
}
