// Application state shared across handlers
use std::sync::Arc;

use crate::{
    app_config::AppConfig,
    db::{LinkStore, RedisPool},
    services::{
        AnalyticsService, ClickRecorder, FraudCheck, LinkService, RedirectService,
        ShortCodeError, ShortCodeGenerator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn LinkStore>,
    pub redis_pool: RedisPool,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Wire services over an already-connected store
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn LinkStore>,
        fraud_check: Arc<dyn FraudCheck>,
        redis_pool: RedisPool,
    ) -> Result<Self, ShortCodeError> {
        let generator = ShortCodeGenerator::new(config.short_code_length)?;

        let link_service = Arc::new(LinkService::new(
            store.clone(),
            Arc::new(generator),
            config.short_code_max_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            link_service.clone(),
            fraud_check,
            ClickRecorder::new(store.clone()),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(store.clone(), config.clone()));

        Ok(Self {
            config,
            store,
            redis_pool,
            link_service,
            redirect_service,
            analytics_service,
        })
    }
}
