// Analytics query params and response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Pagination for GET /api/v1/analytics
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsParams {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,

    /// Items per page (1-100)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: u32,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AnalyticsParams {
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStats {
    /// Calendar month, formatted YYYY-MM
    #[schema(example = "2024-03")]
    pub month: String,
    pub valid_clicks: i64,
    pub earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LinkStats {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub valid_clicks: i64,
    pub earnings: f64,
    pub monthly_stats: Vec<MonthlyStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedLinkStats {
    pub links: Vec<LinkStats>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}
