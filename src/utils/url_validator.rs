// URL canonicalisation for link creation
// Only absolute http(s) URLs with a host are accepted; the stored form is the
// parsed, re-serialized URL so dedup compares canonical strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::models::link::MAX_URL_LENGTH;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported scheme: {0}. Only HTTP and HTTPS are supported")]
    UnsupportedScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("URL too long (max {max}, current {current})")]
    TooLong { max: usize, current: usize },
}

impl UrlValidationError {
    /// Machine-readable error category used in 422 bodies
    pub fn kind(&self) -> &'static str {
        match self {
            UrlValidationError::InvalidFormat(_) => "url_parsing",
            UrlValidationError::UnsupportedScheme(_) => "url_scheme",
            UrlValidationError::MissingHost => "url_host",
            UrlValidationError::TooLong { .. } => "url_too_long",
        }
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Parse and canonicalise a user-supplied URL.
///
/// `https://Example.COM` becomes `https://example.com/`; surrounding
/// whitespace is ignored.
pub fn normalize_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    let max = MAX_URL_LENGTH as usize;

    if trimmed.len() > max {
        return Err(UrlValidationError::TooLong {
            max,
            current: trimmed.len(),
        });
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {},
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    let normalized = parsed.to_string();
    if normalized.len() > max {
        return Err(UrlValidationError::TooLong {
            max,
            current: normalized.len(),
        });
    }

    Ok(normalized)
}
