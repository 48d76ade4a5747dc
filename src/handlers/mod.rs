// HTTP handlers
// Link creation, analytics, redirect, health probes and the OpenAPI document

pub mod analytics;
pub mod docs;
pub mod health;
pub mod links;
pub mod redirect;

use crate::app::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes mounted under /api/v1
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(links::create_link))
        .route("/analytics", get(analytics::get_analytics))
        .route("/health", get(health::health))
        .route("/health/db", get(health::health_db))
        .route("/health/redis", get(health::health_redis))
        .route("/openapi.json", get(docs::serve_openapi_spec))
}
