//! End-to-end API tests for the CRM customer service.
//!
//! The full router is assembled over the in-memory customer store and
//! driven in-process with `tower::ServiceExt::oneshot`, so the suite runs
//! without a database or a listening socket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p crm-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crm_server::config::ServerConfig;
use crm_server::db::InMemoryCustomerStore;
use crm_server::routes;
use crm_server::state::AppState;

/// Build the application router over a fresh in-memory store.
#[must_use]
pub fn test_app() -> Router {
    let state = AppState::new(
        ServerConfig::in_memory(),
        Arc::new(InMemoryCustomerStore::new()),
        None,
    );
    routes::app(state)
}

/// Send a request to the app and return the response.
///
/// # Panics
///
/// Panics if the router fails to produce a response.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should produce a response")
}

/// Build a JSON request.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Build a bodyless request.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

/// Read a response body to a string.
///
/// # Panics
///
/// Panics if the body cannot be collected or is not UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let text = body_string(response).await;
    serde_json::from_str(&text).expect("body should be json")
}
