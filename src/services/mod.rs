// Business logic layer for the application

pub mod analytics;
pub mod click_tracking;
pub mod fraud;
pub mod link;
pub mod redirect;
pub mod short_code;

// Re-export commonly used services
pub use analytics::AnalyticsService;
pub use click_tracking::ClickRecorder;
pub use fraud::{FraudCheck, SimulatedFraudCheck};
pub use link::LinkService;
pub use redirect::{ClientInfo, RedirectService, SHORT_LINK_NOT_FOUND};
pub use short_code::{CodeSource, ShortCodeError, ShortCodeGenerator};
