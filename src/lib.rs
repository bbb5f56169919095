//! Catalog API: schema-validated product CRUD over a document store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{builtin, load_from_path, resolve, CatalogConfig, CatalogVariant, ResolvedCatalog, ResolvedEntity, Settings, StoreBackend};
pub use error::{AppError, ConfigError, FieldError, StoreError};
pub use response::Envelope;
pub use routes::{app_router, catalog_routes, common_routes_with_ready, entity_routes};
pub use service::{CatalogService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, Document, DocumentId, DocumentStore, MemoryDocumentStore, PgDocumentStore};
pub use telemetry::init_tracing;
