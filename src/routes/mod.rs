//! Routers: common probes at the root, catalog and entity routes under `/api`.

mod catalog;
mod common;
mod entity;

pub use catalog::catalog_routes;
pub use common::common_routes_with_ready;
pub use entity::entity_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application router with request tracing and a request body size limit.
/// Oversize bodies fail JSON extraction and are answered as `payload_too_large` errors.
pub fn app_router(state: AppState, body_limit_bytes: usize) -> Router {
    let api = Router::new()
        .merge(catalog_routes(state.clone()))
        .merge(entity_routes(state.clone()));
    Router::new()
        .merge(common_routes_with_ready(state))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}
