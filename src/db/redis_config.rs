use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::AppConfig;

/// Redis connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub redis_url: String,
    // Bounds connection setup as well as each PING
    pub command_timeout: Duration,
}

impl RedisConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            redis_url: config.redis_url.clone(),
            command_timeout: Duration::from_secs(config.redis_command_timeout),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.redis_url.is_empty() {
            return Err("Redis URL cannot be empty".to_string());
        }
        if self.command_timeout.is_zero() {
            return Err("Command timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
