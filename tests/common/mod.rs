#![allow(dead_code)]

use axum::Router;
use axum::ServiceExt;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum_test::TestServer;
use serde_json::json;
use shortly::domain::entities::{ShortCode, UrlRecord};
use shortly::domain::repositories::MappingStore;
use shortly::infrastructure::store::{MemoryStore, UnavailableStore};
use shortly::routes::app_router;
use shortly::state::AppState;
use std::sync::Arc;
use tower_http::normalize_path::NormalizePath;

pub const BASE_URL: &str = "http://localhost:8000";

pub fn create_test_state(store: Arc<dyn MappingStore>, store_connected: bool) -> AppState {
    AppState::new(store, store_connected, BASE_URL)
}

/// Full production stack: routes plus CORS, tracing and trailing-slash layers.
pub fn create_app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

/// Server backed by a fresh in-memory store; the store is returned for seeding.
pub fn memory_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = create_test_state(store.clone(), true);
    let server = TestServer::new(create_app(state)).unwrap();
    (server, store)
}

/// Server whose store cannot be reached, as after a failed startup connection.
pub fn unavailable_server() -> TestServer {
    let store = Arc::new(UnavailableStore::new("connection refused"));
    let state = create_test_state(store, false);
    TestServer::new(create_app(state)).unwrap()
}

pub async fn create_test_link(store: &MemoryStore, code: &str, url: &str) {
    let record = UrlRecord::new(ShortCode::new(code), url.to_string(), 1_234_567_890);
    assert!(store.insert_if_absent(&record).await.unwrap());
}

pub async fn shorten(server: &TestServer, url: &str, custom_code: Option<&str>) -> serde_json::Value {
    let mut body = json!({ "url": url });
    if let Some(code) = custom_code {
        body["custom_code"] = json!(code);
    }

    let response = server.post("/shorten").json(&body).await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()
}
