//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (database ping)
//!
//! # Customers
//! POST   /api/v1/customers          - Create a customer
//! GET    /api/v1/customers          - List customers (optional ?address= filter)
//! GET    /api/v1/customers/{id}     - Get a customer by id
//! PUT    /api/v1/customers/{id}     - Partial update (?name=&email=&address=, each optional)
//! DELETE /api/v1/customers/{id}     - Delete a customer
//! ```

pub mod customers;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::destroy),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/v1/customers", customer_routes())
}

/// Assemble the full application router over the given state.
///
/// Includes the health endpoints and request tracing; the Sentry layers are
/// added by the binary so tests run without them.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK when running on
/// `PostgreSQL`; the in-memory store is always ready.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.pool() {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => StatusCode::OK,
            Err(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        None => StatusCode::OK,
    }
}
