// Redis handle used by the liveness probe
// The connection manager is established on first use so the service can boot
// while Redis is still coming up.

use redis::{aio::ConnectionManager, Client, RedisError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

use super::redis_config::RedisConfig;

#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    manager: Arc<OnceCell<ConnectionManager>>,
    config: RedisConfig,
}

/// Health check status for Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisHealth {
    pub is_healthy: bool,
    pub latency_ms: u64,
    pub error: Option<String>,
}

impl RedisPool {
    #[instrument(skip(config))]
    pub fn new(config: RedisConfig) -> Result<Self, RedisError> {
        config.validate().map_err(|e| {
            error!("Invalid Redis configuration: {}", e);
            RedisError::from((
                redis::ErrorKind::InvalidClientConfig,
                "Invalid configuration",
            ))
        })?;

        info!("Redis URL: {}", mask_redis_url(&config.redis_url));

        let client = Client::open(config.redis_url.as_str())?;

        Ok(Self {
            client,
            manager: Arc::new(OnceCell::new()),
            config,
        })
    }

    /// Get a multiplexed connection, connecting on first call
    pub async fn get_connection(&self) -> Result<ConnectionManager, RedisError> {
        let connect = self
            .manager
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()));

        match tokio::time::timeout(self.config.command_timeout, connect).await {
            Ok(Ok(manager)) => Ok(manager.clone()),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(timeout_error("Connection timeout", &self.config)),
        }
    }

    /// Perform a health check on Redis
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> RedisHealth {
        let start = Instant::now();

        let result = async {
            let mut conn = self.get_connection().await?;
            match tokio::time::timeout(
                self.config.command_timeout,
                redis::cmd("PING").query_async::<String>(&mut conn),
            )
            .await
            {
                Ok(pong) => pong,
                Err(_) => Err(timeout_error("PING timeout", &self.config)),
            }
        }
        .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => RedisHealth {
                is_healthy: true,
                latency_ms,
                error: None,
            },
            Err(e) => {
                error!("Redis health check failed: {}", e);
                RedisHealth {
                    is_healthy: false,
                    latency_ms,
                    error: Some(e.to_string()),
                }
            },
        }
    }
}

fn timeout_error(what: &'static str, config: &RedisConfig) -> RedisError {
    RedisError::from((
        redis::ErrorKind::IoError,
        what,
        format!("{} after {}ms", what, config.command_timeout.as_millis()),
    ))
}

/// Mask Redis URL for logging
pub fn mask_redis_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let host = parsed.host_str().unwrap_or("***");
        let port = parsed.port().unwrap_or(6379);

        if !parsed.username().is_empty() || parsed.password().is_some() {
            format!("redis://***:***@{}:{}", host, port)
        } else {
            format!("redis://{}:{}", host, port)
        }
    } else {
        // Don't expose any part of invalid URL
        "redis://***:***@***:***".to_string()
    }
}
