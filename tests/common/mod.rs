// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_api::{app_router, builtin, AppState, CatalogVariant, DocumentStore, MemoryDocumentStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
}

pub fn app(variant: CatalogVariant) -> TestApp {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = builtin(variant).expect("built-in catalog resolves");
    let state = AppState::new(store.clone() as Arc<dyn DocumentStore>, catalog);
    TestApp {
        router: app_router(state, BODY_LIMIT),
        store,
    }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.raw(request).await
    }

    pub async fn raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }
}

/// Strip store-assigned keys so a stored record can be compared with its input.
pub fn without_server_fields(mut v: Value) -> Value {
    if let Some(obj) = v.as_object_mut() {
        obj.remove("_id");
        obj.remove("createdAt");
        obj.remove("updatedAt");
    }
    v
}
