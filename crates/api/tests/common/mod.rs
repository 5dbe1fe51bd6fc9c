#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use marquee_api::app::build_app;
use marquee_api::config::ServerConfig;
use marquee_api::state::AppState;
use marquee_db::{InMemoryStore, MockCategoryStore, MockMovieStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
    }
}

/// Build the full application router over mocked stores.
///
/// Any store call without a matching expectation panics inside the handler,
/// which `CatchPanicLayer` turns into a 500, so an unexpected call can never
/// pass silently.
pub fn build_test_app(movies: MockMovieStore, categories: MockCategoryStore) -> Router {
    let state = AppState {
        movies: Arc::new(movies),
        categories: Arc::new(categories),
        config: Arc::new(test_config()),
    };
    build_app(state)
}

/// Shorthand for an app whose category store is never expected to be used.
pub fn movies_app(movies: MockMovieStore) -> Router {
    build_test_app(movies, MockCategoryStore::new())
}

/// Shorthand for an app whose movie store is never expected to be used.
pub fn categories_app(categories: MockCategoryStore) -> Router {
    build_test_app(MockMovieStore::new(), categories)
}

/// Build the full application router over a shared in-memory store.
pub fn build_memory_app(store: Arc<InMemoryStore>) -> Router {
    build_app(AppState::new(store, test_config()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

/// POST a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, raw: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
