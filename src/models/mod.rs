pub mod analytics;
pub mod click;
pub mod link;

// Re-export common types
pub use analytics::{AnalyticsParams, LinkStats, MonthlyStats, PaginatedLinkStats};
pub use click::{Click, ClickRow, NewClick};
pub use link::{CreateLinkRequest, Link, LinkResponse, NewLink};
