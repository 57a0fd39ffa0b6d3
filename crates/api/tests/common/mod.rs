#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use songbridge_api::config::{ProviderConfig, ServerConfig};
use songbridge_api::router::build_app_router;
use songbridge_api::state::AppState;

pub const TEST_TAG: &str = "songbridge";

/// Build a test `ServerConfig` pointing both upstreams at the given bases.
///
/// Both credentials are set and CORS allows any origin.
pub fn test_config(music_base: &str, upload_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        attribution_tag: TEST_TAG.to_string(),
        provider: ProviderConfig {
            music_api_base: music_base.to_string(),
            upload_api_base: upload_base.to_string(),
            music_api_key: Some("music-key".to_string()),
            upload_api_key: Some("upload-key".to_string()),
            callback_base_url: Some("https://songbridge.example".to_string()),
            upstream_timeout_secs: 10,
        },
    }
}

/// Config whose upstreams are never reachable. For tests that must fail
/// before any upstream call.
pub fn offline_config() -> ServerConfig {
    test_config("http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone()).expect("HTTP client should build");
    build_app_router(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// First key of a JSON object body.
pub fn first_key(json: &Value) -> Option<&str> {
    json.as_object()?.keys().next().map(String::as_str)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}
