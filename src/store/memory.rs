//! In-process document store for local runs and tests.

use super::{Document, DocumentId, DocumentStore};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> Result<Document, StoreError> {
        let now = chrono::Utc::now();
        let doc = Document {
            id: DocumentId::new(),
            fields,
            created_at: now,
            updated_at: now,
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.fields.extend(patch);
        doc.updated_at = chrono::Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs.iter().position(|d| d.id == id).map(|i| docs.remove(i)))
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
