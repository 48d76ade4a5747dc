use std::net::SocketAddr;

use anyhow::Context;
use shortlink_backend::{
    app_config::DEFAULT_LOG_FILTER, build_router, initialize_app_state, AppConfig,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing from the configured filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.rust_log)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_address = config.bind_address.clone();
    info!(
        "Starting shortlink backend on {} ({}, {:?} store)",
        bind_address, config.environment, config.storage_backend
    );

    let state = initialize_app_state(config)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize application state")?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
