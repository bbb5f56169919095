//! Catalog introspection and sample-data seeding.

use crate::error::AppError;
use crate::handlers::entity::entity_for;
use crate::response::Envelope;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
struct CatalogBody<'a> {
    name: &'a str,
    envelope: Envelope,
    entities: &'a [crate::config::ResolvedEntity],
}

/// GET /api/catalog: catalog name, envelope and entity schemas.
pub async fn get_catalog(State(state): State<AppState>) -> Response {
    let catalog = &state.catalog;
    let body = CatalogBody {
        name: &catalog.name,
        envelope: catalog.envelope,
        entities: &catalog.entities,
    };
    state.envelope().one(StatusCode::OK, body)
}

/// GET /api/catalog/:path_segment
pub async fn get_entity_schema(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    Ok(state.envelope().one(StatusCode::OK, entity))
}

/// POST /api/sample-data. Seeds each empty collection that has samples.
/// Not atomic across entities: a failure leaves earlier entities seeded, and a rerun skips them.
pub async fn seed_sample_data(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut seeded = Map::new();
    for entity in &state.catalog.entities {
        if entity.samples.is_empty() {
            continue;
        }
        let inserted = match CatalogService::seed_samples(state.store.as_ref(), entity).await {
            Ok(n) => n,
            Err(e) => {
                let done: Vec<&String> = seeded.keys().collect();
                tracing::error!(entity = %entity.path_segment, seeded = ?done, "sample seeding stopped");
                return Err(e);
            }
        };
        seeded.insert(entity.path_segment.clone(), Value::from(inserted));
    }
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Sample data created successfully",
        "seeded": seeded,
    })))
}
