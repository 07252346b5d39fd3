//! Router assembly: operational routes at the root, entity resources under `/api`.

mod common;
mod entity;

pub use common::{common_routes, common_routes_with_ready, greeting_routes};
pub use entity::entity_routes;

use crate::config::AppConfig;
use crate::handlers::EntityContext;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Every resource below `/api`: the four entity collections and `/api/test`.
pub fn api_routes(state: &AppState) -> Router {
    Router::new()
        .merge(entity_routes(EntityContext::new(state.demo.clone(), state.alerts.clone())))
        .merge(entity_routes(EntityContext::new(state.demo1.clone(), state.alerts.clone())))
        .merge(entity_routes(EntityContext::new(state.demo2.clone(), state.alerts.clone())))
        .merge(entity_routes(EntityContext::new(state.demo3.clone(), state.alerts.clone())))
        .merge(greeting_routes())
}

/// Full application router with body limit and request tracing.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .nest("/api", api_routes(&state))
        .merge(common_routes_with_ready(state))
        .layer(RequestBodyLimitLayer::new(config.server.body_limit))
        .layer(TraceLayer::new_for_http())
}
