//! Shared helpers for HTTP-level tests: an in-memory app and request/response plumbing.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use session_guard::{
    app::build_router,
    config::{AppEnv, Config},
    repos::user_repo::{InMemoryUserStore, UserRow},
    services::auth::token::TokenService,
    state::AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        database_url: None,
        database_max_connections: 1,
        cors_allowed_origins: Vec::new(),
        request_timeout_seconds: 30,
        request_body_limit_bytes: 1024 * 1024,
        jwt_secret: TEST_SECRET.to_string(),
        auth_issuer: "session-guard".to_string(),
        auth_audience: "session-guard".to_string(),
        access_token_ttl_seconds: 3600,
        access_token_leeway_seconds: 0,
    }
}

/// Production settings with one allowed origin, a small body limit and a short timeout.
pub fn production_config() -> Config {
    Config {
        app_env: AppEnv::Production,
        database_url: Some("postgres://localhost/unused".to_string()),
        cors_allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        request_timeout_seconds: 1,
        request_body_limit_bytes: 256,
        ..test_config()
    }
}

pub const ALLOWED_ORIGIN: &str = "https://app.example";

/// Fresh state per test; the in-memory store plays the role of a truncated database.
pub fn test_state() -> AppState {
    let config = test_config();
    let tokens = TokenService::new(
        &config.jwt_secret,
        config.auth_issuer,
        config.auth_audience,
        config.access_token_ttl_seconds,
        config.access_token_leeway_seconds,
    )
    .unwrap();

    AppState::new(Arc::new(InMemoryUserStore::new()), Arc::new(tokens))
}

pub fn test_app(state: AppState) -> Router {
    test_app_with(state, &test_config())
}

pub fn test_app_with(state: AppState, config: &Config) -> Router {
    build_router(state, config)
}

pub async fn create_user(state: &AppState, email: &str, password: &str) -> UserRow {
    state.users.create("Diego", email, password).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method("GET").uri(uri);
    let builder = match authorization {
        Some(value) => builder.header("authorization", value),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
