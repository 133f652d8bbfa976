#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use fast_car_api::{app, connect, connect_in_memory, ensure_tables, AppConfig, AppState};

/// Fresh in-memory database with the `cars` table.
pub async fn test_pool() -> SqlitePool {
    connect_in_memory().await.unwrap()
}

/// File-backed database with several pooled connections, so writers really contend
/// for the lock. Keep the `TempDir` alive for as long as the pool is used.
pub async fn file_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_url: format!("sqlite://{}", dir.path().join("cars.db").display()),
        max_connections: 8,
        ..AppConfig::default()
    };
    let pool = connect(&config).await.unwrap();
    ensure_tables(&pool).await.unwrap();
    (dir, pool)
}

/// Full router (same layers as the binary) over a fresh database.
pub async fn build_test_app() -> Router {
    build_test_app_with(&AppConfig::default()).await
}

/// Same as [`build_test_app`] with the layers configured from `config`.
pub async fn build_test_app_with(config: &AppConfig) -> Router {
    let pool = test_pool().await;
    app(AppState::new(pool), config)
}

pub fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "color": "red",
        "model": "Corolla",
        "model_year": 2022,
        "factory_year": 2021
    })
}

pub fn civic() -> Value {
    json!({
        "brand": "Honda",
        "color": "black",
        "model": "Civic",
        "model_year": 2020,
        "factory_year": 2019,
        "description": "garage kept"
    })
}

/// Send one request; returns the status and the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}
