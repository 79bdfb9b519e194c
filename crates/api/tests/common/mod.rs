#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taskboard_api::config::{LogFormat, ServerConfig, StoreBackend, StoreConfig};
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_db::store::MemoryDocumentStore;

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            host: "localhost".to_string(),
            port: 5432,
            bucket: "taskboard".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 1,
        },
    }
}

/// Build the full application router over `store`.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app_with(store: Arc<MemoryDocumentStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the application over a fresh, empty in-memory store.
pub fn build_test_app() -> (Router, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    (build_test_app_with(Arc::clone(&store)), store)
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// GET `uri` and return status plus parsed body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = get(app.clone(), uri).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// POST `body` to `uri` and return status plus parsed body.
pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = post_json(app.clone(), uri, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Create a user through the API.
pub async fn create_user(app: &Router, username: &str, password: &str) {
    let (status, _) = post(
        app,
        "/api/user/create",
        serde_json::json!({ "username": username, "password": password, "name": username }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "creating user {username}");
}

/// Create a project through the API and return its id.
pub async fn create_project(app: &Router, owner: &str, users: &[&str]) -> String {
    let (status, json) = post(
        app,
        "/api/project/create",
        serde_json::json!({ "name": "Launch", "description": "D", "owner": owner, "users": users }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["_id"].as_str().unwrap().to_string()
}

/// Create a task in `project_id` through the API and return its id.
pub async fn create_task(app: &Router, project_id: &str, owner: &str) -> String {
    let (status, json) = post(
        app,
        &format!("/api/task/create/{project_id}"),
        serde_json::json!({ "name": "T", "description": "D", "owner": owner, "users": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["_id"].as_str().unwrap().to_string()
}
