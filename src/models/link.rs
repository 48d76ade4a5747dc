// Core link model plus the create-link request/response shapes

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::links;

/// Longest URL accepted for shortening
pub const MAX_URL_LENGTH: u64 = 2083;

// =============================================================================
// DATABASE MODELS
// =============================================================================

/// Link model representing a database record
#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

/// New link for insertion
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = links)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// REQUEST/RESPONSE DTOs
// =============================================================================

/// Create link request; `original_url` is checked by `normalize_url`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({ "original_url": "https://example.com/very/long/url" }))]
pub struct CreateLinkRequest {
    /// Absolute http(s) URL, at most 2083 characters
    #[schema(max_length = 2083)]
    pub original_url: String,
}

/// Link response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: format!("{}/{}", base_url, link.short_code),
            original_url: link.original_url,
            short_code: link.short_code,
            created_at: link.created_at,
        }
    }
}
