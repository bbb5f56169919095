//! Entity CRUD routes. Handlers resolve the entity from the path segment against the catalog.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route(
            "/:path_segment/:id",
            get(read).put(update).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
