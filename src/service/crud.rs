//! Catalog CRUD: validate, make exactly one store call, shape the document.

use crate::config::ResolvedEntity;
use crate::error::{AppError, FieldError};
use crate::service::RequestValidator;
use crate::store::{DocumentId, DocumentStore};
use serde_json::{Map, Value};

pub struct CatalogService;

impl CatalogService {
    /// All documents of the entity, oldest first.
    pub async fn list(store: &dyn DocumentStore, entity: &ResolvedEntity) -> Result<Vec<Value>, AppError> {
        let docs = store.list(&entity.collection).await?;
        Ok(docs.into_iter().map(|d| d.into_json()).collect())
    }

    pub async fn read(
        store: &dyn DocumentStore,
        entity: &ResolvedEntity,
        id: DocumentId,
    ) -> Result<Option<Value>, AppError> {
        let doc = store.get(&entity.collection, id).await?;
        Ok(doc.map(|d| d.into_json()))
    }

    /// Validate the full body and insert it. Nothing is written when validation fails.
    pub async fn create(store: &dyn DocumentStore, entity: &ResolvedEntity, body: Value) -> Result<Value, AppError> {
        let body = body_to_map(body)?;
        let fields = RequestValidator::validate(&body, &entity.fields).map_err(|e| invalid(entity, e))?;
        let doc = store.insert(&entity.collection, fields).await?;
        tracing::info!(entity = %entity.path_segment, id = %doc.id, "created");
        Ok(doc.into_json())
    }

    /// Validate the fields present in body and merge them into the stored document.
    pub async fn update(
        store: &dyn DocumentStore,
        entity: &ResolvedEntity,
        id: DocumentId,
        body: Value,
    ) -> Result<Option<Value>, AppError> {
        let body = body_to_map(body)?;
        let patch = RequestValidator::validate_partial(&body, &entity.fields).map_err(|e| invalid(entity, e))?;
        let doc = store.update(&entity.collection, id, patch).await?;
        if let Some(doc) = &doc {
            tracing::info!(entity = %entity.path_segment, id = %doc.id, "updated");
        }
        Ok(doc.map(|d| d.into_json()))
    }

    pub async fn delete(
        store: &dyn DocumentStore,
        entity: &ResolvedEntity,
        id: DocumentId,
    ) -> Result<Option<Value>, AppError> {
        let doc = store.delete(&entity.collection, id).await?;
        if doc.is_some() {
            tracing::info!(entity = %entity.path_segment, id = %id, "deleted");
        }
        Ok(doc.map(|d| d.into_json()))
    }

    /// Insert the entity's sample records if its collection is empty. Returns how many were inserted.
    pub async fn seed_samples(store: &dyn DocumentStore, entity: &ResolvedEntity) -> Result<u64, AppError> {
        if entity.samples.is_empty() || store.count(&entity.collection).await? > 0 {
            return Ok(0);
        }
        let mut inserted = 0;
        for sample in &entity.samples {
            let body = body_to_map(sample.clone())?;
            let fields = RequestValidator::validate(&body, &entity.fields).map_err(|e| invalid(entity, e))?;
            store.insert(&entity.collection, fields).await?;
            inserted += 1;
        }
        tracing::info!(entity = %entity.path_segment, inserted, "seeded sample data");
        Ok(inserted)
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn invalid(entity: &ResolvedEntity, errors: Vec<FieldError>) -> AppError {
    AppError::Validation {
        message: format!("Invalid {} data", entity.label.to_lowercase()),
        errors,
    }
}
