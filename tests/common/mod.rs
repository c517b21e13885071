#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use circl::{api, service::ServiceContext};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tower::ServiceExt;

/// Fresh in-memory database with migrations applied. A single connection
/// that never idles out keeps the in-memory database alive for the test.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}

/// File-backed database in `dir` with the production pool size, for tests
/// that need several connections writing at once.
pub async fn file_pool(dir: &tempfile::TempDir) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("circl-test.db"))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}

pub fn test_app(pool: SqlitePool) -> Router {
    api::create_app(Arc::new(ServiceContext::from_pool(pool)))
}

pub async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;

    send(app, request).await
}
