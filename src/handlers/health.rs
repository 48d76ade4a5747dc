// Liveness and dependency probes

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::{app::AppState, utils::service_error::ServiceError};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "OK" }))
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    operation_id = "health",
    responses((status = 200, description = "Process is up"))
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[utoipa::path(
    get,
    path = "/api/v1/health/db",
    tag = "Health",
    operation_id = "healthDb",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn health_db(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    state.store.ping().await.map_err(|e| {
        warn!("Database health check failed: {}", e);
        ServiceError::DependencyUnavailable("Database unavailable".to_string())
    })?;

    Ok(Json(json!({ "status": "ok" })))
}

#[utoipa::path(
    get,
    path = "/api/v1/health/redis",
    tag = "Health",
    operation_id = "healthRedis",
    responses(
        (status = 200, description = "Redis reachable"),
        (status = 503, description = "Redis unavailable")
    )
)]
pub async fn health_redis(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    let health = state.redis_pool.health_check().await;
    if !health.is_healthy {
        return Err(ServiceError::DependencyUnavailable(
            "Redis unavailable".to_string(),
        ));
    }

    Ok(Json(json!({ "status": "ok" })))
}
