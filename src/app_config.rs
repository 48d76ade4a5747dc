// Centralized configuration management for the shortlink backend
// Load ALL env vars ONCE at startup, then hand the result around explicitly

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::services::short_code::MAX_CODE_LENGTH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Log filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "shortlink_backend=debug,tower_http=info";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Server
    pub bind_address: String,
    pub environment: Environment,
    pub rust_log: String,
    pub cors_allowed_origins: Vec<String>,

    // Links
    pub base_url: String,
    pub credit_per_click_cents: u32,
    pub short_code_length: usize,
    pub short_code_max_attempts: u32,

    // Fraud check
    pub fraud_check_delay_ms: u64,
    pub fraud_valid_probability: f64,

    // Storage
    pub storage_backend: StorageBackend,
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub database_connect_timeout: u64,
    pub database_idle_timeout: u64,
    pub database_max_lifetime: u64,
    pub disable_embedded_migrations: bool,

    // Redis
    pub redis_url: String,
    pub redis_command_timeout: u64,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which engine backs the link store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidValue(
                "STORAGE_BACKEND".to_string(),
                format!("unknown backend '{}', expected postgres or memory", other),
            )),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Helper function to get optional env var with default
        let get_or_default = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // Helper function to parse env var with default
        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_f64_or_default = |key: &str, default: &str| -> Result<f64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid number".to_string())
            })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:8080");
        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));
        let rust_log = get_or_default("RUST_LOG", DEFAULT_LOG_FILTER);
        let cors_allowed_origins: Vec<String> = get_or_default("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base_url = get_or_default("BASE_URL", "http://localhost:8080")
            .trim_end_matches('/')
            .to_string();
        let credit_per_click_cents = parse_or_default("CREDIT_PER_CLICK", "5")?;
        let short_code_length = parse_or_default("SHORT_CODE_LENGTH", "6")? as usize;
        let short_code_max_attempts = parse_or_default("SHORT_CODE_MAX_ATTEMPTS", "10")?;

        let fraud_check_delay_ms = parse_u64_or_default("FRAUD_CHECK_DELAY_MS", "100")?;
        let fraud_valid_probability = parse_f64_or_default("FRAUD_VALID_PROBABILITY", "0.9")?;

        let storage_backend: StorageBackend =
            get_or_default("STORAGE_BACKEND", "postgres").parse()?;

        // Only the postgres backend needs a database URL
        let database_url = match (storage_backend, env::var("DATABASE_URL")) {
            (_, Ok(url)) => url,
            (StorageBackend::Memory, Err(_)) => String::new(),
            (StorageBackend::Postgres, Err(_)) => {
                return Err(ConfigError::MissingVar("DATABASE_URL".to_string()))
            },
        };
        let database_max_connections = parse_or_default("DATABASE_MAX_CONNECTIONS", "20")?;
        let database_min_connections = parse_or_default("DATABASE_MIN_CONNECTIONS", "2")?;
        let database_connect_timeout = parse_u64_or_default("DATABASE_CONNECT_TIMEOUT", "30")?;
        let database_idle_timeout = parse_u64_or_default("DATABASE_IDLE_TIMEOUT", "600")?;
        let database_max_lifetime = parse_u64_or_default("DATABASE_MAX_LIFETIME", "1800")?;
        let disable_embedded_migrations =
            parse_bool_or_default("DISABLE_EMBEDDED_MIGRATIONS", "false");

        let redis_url = get_or_default("REDIS_URL", "redis://localhost:6379");
        let redis_command_timeout = parse_u64_or_default("REDIS_COMMAND_TIMEOUT", "5")?;

        let config = Self {
            bind_address,
            environment,
            rust_log,
            cors_allowed_origins,
            base_url,
            credit_per_click_cents,
            short_code_length,
            short_code_max_attempts,
            fraud_check_delay_ms,
            fraud_valid_probability,
            storage_backend,
            database_url,
            database_max_connections,
            database_min_connections,
            database_connect_timeout,
            database_idle_timeout,
            database_max_lifetime,
            disable_embedded_migrations,
            redis_url,
            redis_command_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "BASE_URL".to_string(),
                "cannot be empty".to_string(),
            ));
        }
        if self.short_code_length == 0 || self.short_code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::InvalidValue(
                "SHORT_CODE_LENGTH".to_string(),
                format!("must be between 1 and {}", MAX_CODE_LENGTH),
            ));
        }
        if self.short_code_max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "SHORT_CODE_MAX_ATTEMPTS".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fraud_valid_probability) {
            return Err(ConfigError::InvalidValue(
                "FRAUD_VALID_PROBABILITY".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if self.database_min_connections > self.database_max_connections {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MIN_CONNECTIONS".to_string(),
                "cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration suitable for tests and local tooling: memory store, no sleeps
    pub fn for_tests() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
            environment: Environment::Test,
            rust_log: "debug".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            base_url: "http://short.test".to_string(),
            credit_per_click_cents: 5,
            short_code_length: 6,
            short_code_max_attempts: 10,
            fraud_check_delay_ms: 0,
            fraud_valid_probability: 1.0,
            storage_backend: StorageBackend::Memory,
            database_url: String::new(),
            database_max_connections: 5,
            database_min_connections: 1,
            database_connect_timeout: 5,
            database_idle_timeout: 600,
            database_max_lifetime: 1800,
            disable_embedded_migrations: true,
            // Port 1 refuses connections, so the probe fails fast
            redis_url: "redis://127.0.0.1:1".to_string(),
            redis_command_timeout: 1,
        }
    }

    /// Full short URL for a code
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

}
