// Redirect pipeline: resolve -> fraud check -> record click -> target URL

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    services::{click_tracking::ClickRecorder, fraud::FraudCheck, link::LinkService},
    utils::service_error::ServiceError,
};

pub const SHORT_LINK_NOT_FOUND: &str = "Short link not found";

/// What the client told us about itself; both parts are optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub struct RedirectService {
    links: Arc<LinkService>,
    fraud_check: Arc<dyn FraudCheck>,
    recorder: ClickRecorder,
}

impl RedirectService {
    pub fn new(
        links: Arc<LinkService>,
        fraud_check: Arc<dyn FraudCheck>,
        recorder: ClickRecorder,
    ) -> Self {
        Self {
            links,
            fraud_check,
            recorder,
        }
    }

    /// Resolve `short_code` to its destination, recording exactly one click.
    ///
    /// Unknown codes record nothing. Flagged clicks are still recorded and
    /// still redirect; a failing fraud check or store aborts the redirect.
    #[instrument(skip(self, client))]
    pub async fn resolve(
        &self,
        short_code: &str,
        client: &ClientInfo,
    ) -> Result<String, ServiceError> {
        let link = match self.links.find_by_short_code(short_code).await? {
            Some(link) => link,
            None => {
                warn!("Short link not found: {}", short_code);
                return Err(ServiceError::NotFound(SHORT_LINK_NOT_FOUND.to_string()));
            },
        };

        let is_valid = self
            .fraud_check
            .validate(client.ip_address.as_deref(), client.user_agent.as_deref())
            .await?;

        self.recorder
            .record(
                link.id,
                client.ip_address.clone(),
                client.user_agent.clone(),
                is_valid,
            )
            .await?;

        info!("Redirecting {} to {}", short_code, link.original_url);
        Ok(link.original_url)
    }
}
