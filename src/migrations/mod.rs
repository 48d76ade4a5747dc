// Migration entry point
// Embedded in the application binary so deployments need no diesel CLI

pub mod diesel;

use crate::app_config::{AppConfig, StorageBackend};
use std::error::Error;
use tracing::{error, info};

/// Whether startup should apply embedded migrations
pub fn should_run_migrations(config: &AppConfig) -> bool {
    config.storage_backend == StorageBackend::Postgres && !config.disable_embedded_migrations
}

pub async fn run_all_migrations(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!(
        "[MIGRATIONS] Starting migration process for environment: {}",
        config.environment
    );

    match diesel::run_migrations(&config.database_url).await {
        Ok(0) => info!("[MIGRATIONS] ✓ Diesel migrations up to date"),
        Ok(applied) => info!("[MIGRATIONS] ✓ Applied {} Diesel migrations", applied),
        Err(e) => {
            error!("[MIGRATIONS] ✗ Diesel migration failed: {}", e);
            return Err(format!("Diesel migration failed: {}", e).into());
        },
    }

    Ok(())
}
