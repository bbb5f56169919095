//! Entity CRUD handlers: list, create, read, update, delete.

use crate::config::ResolvedEntity;
use crate::error::AppError;
use crate::response;
use crate::service::CatalogService;
use crate::state::AppState;
use crate::store::DocumentId;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};
use serde_json::Value;

pub(crate) fn entity_for<'a>(state: &'a AppState, path_segment: &str) -> Result<&'a ResolvedEntity, AppError> {
    state
        .catalog
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("Entity '{}'", path_segment)))
}

fn parse_id(entity: &ResolvedEntity, id_str: &str) -> Result<DocumentId, AppError> {
    DocumentId::parse(id_str)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {} ID", entity.label.to_lowercase())))
}

pub async fn list(State(state): State<AppState>, Path(path_segment): Path<String>) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    let rows = CatalogService::list(state.store.as_ref(), entity).await?;
    Ok(state.envelope().many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    let Json(body) = payload?;
    let row = CatalogService::create(state.store.as_ref(), entity, body).await?;
    Ok(response::created(state.envelope(), row))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    let row = CatalogService::read(state.store.as_ref(), entity, id)
        .await?
        .ok_or_else(|| AppError::NotFound(entity.label.clone()))?;
    Ok(response::ok(state.envelope(), row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    let Json(body) = payload?;
    let row = CatalogService::update(state.store.as_ref(), entity, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(entity.label.clone()))?;
    Ok(response::ok(state.envelope(), row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let entity = entity_for(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    CatalogService::delete(state.store.as_ref(), entity, id)
        .await?
        .ok_or_else(|| AppError::NotFound(entity.label.clone()))?;
    Ok(state
        .envelope()
        .message(format!("{} deleted successfully", entity.label)))
}
