//! Catalog introspection and sample-data routes.

use crate::handlers::catalog::{get_catalog, get_entity_schema, seed_sample_data};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/catalog/:path_segment", get(get_entity_schema))
        .route("/sample-data", post(seed_sample_data))
        .with_state(state)
}
