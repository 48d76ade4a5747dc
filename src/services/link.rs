// Link registry: create-or-reuse a short code for a canonical URL

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    db::{LinkStore, StoreError},
    models::{Link, NewLink},
    services::short_code::CodeSource,
    utils::service_error::ServiceError,
};

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    codes: Arc<dyn CodeSource>,
    max_attempts: u32,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, codes: Arc<dyn CodeSource>, max_attempts: u32) -> Self {
        Self {
            store,
            codes,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Return the existing link for `original_url`, or create one.
    ///
    /// URL matching is exact, so callers pass the canonical form. Two
    /// concurrent first requests for the same URL may both insert; short
    /// codes stay unique because the store rejects duplicates and this loop
    /// retries with a fresh code.
    #[instrument(skip(self))]
    pub async fn create_or_get(&self, original_url: &str) -> Result<Link, ServiceError> {
        if let Some(existing) = self.store.find_by_original_url(original_url).await? {
            info!("Found existing link {} for URL", existing.short_code);
            return Ok(existing);
        }

        for attempt in 1..=self.max_attempts {
            let short_code = self.codes.next_code();

            if self.store.short_code_exists(&short_code).await? {
                debug!("Short code {} taken (attempt {})", short_code, attempt);
                continue;
            }

            let new_link = NewLink {
                original_url: original_url.to_string(),
                short_code,
                created_at: Utc::now(),
            };

            match self.store.insert_link(new_link).await {
                Ok(link) => {
                    info!("Created link {} (attempt {})", link.short_code, attempt);
                    return Ok(link);
                },
                Err(StoreError::DuplicateShortCode(code)) => {
                    warn!("Lost insert race for short code {}, retrying", code);
                },
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::ShortCodeExhausted(self.max_attempts))
    }

    pub async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, ServiceError> {
        Ok(self.store.find_by_short_code(short_code).await?)
    }
}
