//! Shared application state for all routes.

use crate::config::ResolvedCatalog;
use crate::response::Envelope;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub catalog: Arc<ResolvedCatalog>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: ResolvedCatalog) -> Self {
        AppState {
            store,
            catalog: Arc::new(catalog),
        }
    }

    pub fn envelope(&self) -> Envelope {
        self.catalog.envelope
    }
}
