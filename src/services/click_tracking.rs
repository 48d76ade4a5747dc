// Click recording: one immutable row per resolved redirect

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::LinkStore,
    models::{Click, NewClick},
    utils::service_error::ServiceError,
};

pub struct ClickRecorder {
    store: Arc<dyn LinkStore>,
}

impl ClickRecorder {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Persist a click that already carries its fraud verdict
    #[instrument(skip(self, ip_address, user_agent))]
    pub async fn record(
        &self,
        link_id: i64,
        ip_address: Option<String>,
        user_agent: Option<String>,
        is_valid: bool,
    ) -> Result<Click, ServiceError> {
        let click = self
            .store
            .insert_click(NewClick {
                link_id,
                ip_address,
                user_agent,
                is_valid,
                created_at: Utc::now(),
            })
            .await?;

        info!("Recorded click {} for link {} (valid: {})", click.id, link_id, is_valid);
        Ok(click)
    }
}
