use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, warn};

use crate::app_config::AppConfig;

/// CORS policy from CORS_ALLOWED_ORIGINS: `*` allows any origin, otherwise
/// only the listed origins are reflected
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        debug!("CORS: allowing any origin");
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("CORS: ignoring invalid origin {:?}", origin);
                None
            },
        })
        .collect();

    debug!("CORS: {} whitelisted origins", origins.len());
    base.allow_origin(AllowOrigin::list(origins))
}
