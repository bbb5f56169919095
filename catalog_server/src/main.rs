//! Catalog server: reads settings from the environment, opens the document store, resolves the
//! catalog, creates its collections and serves the API.
//!
//! Run from repo root: `cargo run -p catalog-server`
//! Without PostgreSQL: `STORE_BACKEND=memory SEED_SAMPLE_DATA=true cargo run -p catalog-server`

use catalog_api::{
    app_router, ensure_database_exists, init_tracing, AppState, CatalogService, DocumentStore, MemoryDocumentStore,
    PgDocumentStore, Settings, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("catalog_api=info,catalog_server=info,tower_http=info");

    let settings = Settings::from_env()?;
    let catalog = settings.load_catalog().await?;
    tracing::info!(
        catalog = %catalog.name,
        entities = catalog.entities.len(),
        envelope = ?catalog.envelope,
        "catalog resolved"
    );

    let store: Arc<dyn DocumentStore> = match settings.store_backend {
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.database_max_connections)
                .connect(&settings.database_url)
                .await?;
            let store = PgDocumentStore::new(pool, settings.catalog_schema.clone());
            store.ensure_schema().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    for entity in &catalog.entities {
        store.ensure_collection(&entity.collection).await?;
    }

    let state = AppState::new(store, catalog);
    if settings.seed_sample_data {
        for entity in &state.catalog.entities {
            CatalogService::seed_samples(state.store.as_ref(), entity).await?;
        }
    }

    let app = app_router(state, settings.body_limit_bytes);
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
