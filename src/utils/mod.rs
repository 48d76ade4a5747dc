// Utility modules for the shortlink backend

pub mod service_error;
pub mod url_validator;

pub use service_error::{FieldError, ServiceError};
pub use url_validator::{normalize_url, UrlValidationError};
