// Click fraud check
// The production check is a stand-in: fixed latency, then a weighted coin.

use async_trait::async_trait;
use rand::{thread_rng, Rng};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::{app_config::AppConfig, utils::service_error::ServiceError};

/// Latency-bearing validity predicate for a click
#[async_trait]
pub trait FraudCheck: Send + Sync {
    async fn validate(
        &self,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SimulatedFraudCheck {
    delay: Duration,
    valid_probability: f64,
}

impl SimulatedFraudCheck {
    pub fn new(delay: Duration, valid_probability: f64) -> Self {
        Self {
            delay,
            valid_probability: valid_probability.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Duration::from_millis(config.fraud_check_delay_ms),
            config.fraud_valid_probability,
        )
    }
}

#[async_trait]
impl FraudCheck for SimulatedFraudCheck {
    #[instrument(skip(self))]
    async fn validate(
        &self,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<bool, ServiceError> {
        // Suspends only this task
        tokio::time::sleep(self.delay).await;

        let is_valid = thread_rng().gen_bool(self.valid_probability);
        if is_valid {
            info!("Click validated");
        } else {
            warn!("Click flagged as potentially fraudulent");
        }

        Ok(is_valid)
    }
}
