#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use spendlog_api::config::ServerConfig;
use spendlog_api::router::build_app_router;
use spendlog_api::state::AppState;
use spendlog_core::timestamp::{display_offset, DEFAULT_DISPLAY_OFFSET_HOURS};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the default UTC-3 display offset.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        display_offset: display_offset(DEFAULT_DISPLAY_OFFSET_HOURS).unwrap(),
    }
}

/// Build the full application router over the given pool.
///
/// Goes through [`build_app_router`] so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
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

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw, possibly malformed, body with a JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(pool: &PgPool, name: &str, order: Option<i32>) -> String {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/categories",
        serde_json::json!({ "name": name, "order": order }),
    )
    .await;
    assert_eq!(response.status(), 201, "category setup failed");
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create an expense through the API and return its JSON view.
pub async fn create_expense(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/expenses", body).await;
    assert_eq!(response.status(), 201, "expense setup failed");
    body_json(response).await
}
