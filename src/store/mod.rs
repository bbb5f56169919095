//! Document store: one collection per entity, each document a flat JSON object keyed by an opaque id.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_database_exists, PgDocumentStore};

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Store-assigned document id. Clients see it as an opaque string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        DocumentId(Uuid::new_v4())
    }

    /// Parse a client-supplied id; `None` if it is not one this store could have issued.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(DocumentId)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(u: Uuid) -> Self {
        DocumentId(u)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// API shape: `_id`, the stored fields, then `createdAt` / `updatedAt` in RFC 3339.
    pub fn into_json(self) -> Value {
        let mut out = Map::new();
        out.insert("_id".into(), Value::String(self.id.to_string()));
        out.extend(self.fields);
        out.insert("createdAt".into(), Value::String(self.created_at.to_rfc3339()));
        out.insert("updatedAt".into(), Value::String(self.updated_at.to_rfc3339()));
        Value::Object(out)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create backing storage for a collection if it does not exist yet.
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError>;

    /// All documents in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Insert with a fresh id and both timestamps set to now.
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> Result<Document, StoreError>;

    /// Shallow-merge `patch` into the stored fields and refresh `updated_at`. `None` if absent.
    async fn update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove and return the document. `None` if absent.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError>;

    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
