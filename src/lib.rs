// Library exports for the shortlink backend
// The binary and the integration tests both build the app through here

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, ConfigError, Environment, StorageBackend};
pub use db::{DieselPool, LinkStore, MemoryLinkStore, PgLinkStore, RedisConfig, RedisPool};
pub use services::{FraudCheck, SimulatedFraudCheck};
pub use utils::service_error::ServiceError;

/// Connect storage and redis, run migrations, and wire the services
pub async fn initialize_app_state(
    config: AppConfig,
) -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    let config = Arc::new(config);

    let store: Arc<dyn LinkStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            if migrations::should_run_migrations(&config) {
                info!("Running embedded migrations...");
                migrations::run_all_migrations(&config).await?;
            }

            info!("Initializing database pool...");
            let db_config = db::DieselDatabaseConfig::from_app_config(&config);
            let pool = db::create_diesel_pool(db_config).await?;
            Arc::new(PgLinkStore::new(pool))
        },
        StorageBackend::Memory => {
            info!("Using in-memory link store");
            Arc::new(MemoryLinkStore::new())
        },
    };

    // Connects lazily; the probe reports when Redis is down
    let redis_pool = RedisPool::new(RedisConfig::from_app_config(&config))?;

    let fraud_check = Arc::new(SimulatedFraudCheck::from_config(&config));

    Ok(AppState::new(config, store, fraud_check, redis_pool)?)
}

/// Full router: root probe, /api/v1 routes and the short code catch-all
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .nest("/api/v1", handlers::api_routes())
        .route("/{short_code}", get(handlers::redirect::redirect_to_url))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
