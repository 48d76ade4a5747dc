// Service error type shared by all handlers
// Every failure leaves the service as a `{"detail": ...}` JSON body

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{
    db::StoreError, services::short_code::ShortCodeError,
    utils::url_validator::UrlValidationError,
};

/// One entry of a 422 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DependencyUnavailable(String),

    #[error("Failed to generate unique short code after {0} attempts")]
    ShortCodeExhausted(u32),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    InternalError,
}

impl ServiceError {
    /// Build a 422 from validator output, prefixing each field with `location`
    pub fn from_validation(location: &str, errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let details = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldError::new(&[location, field], msg, format!("value_error.{}", err.code))
                })
            })
            .collect();

        ServiceError::Validation(details)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::DependencyUnavailable(_) | ServiceError::ShortCodeExhausted(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            },
            ServiceError::DatabaseError(_) | ServiceError::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ServiceError::Validation(details) => json!({ "detail": details }),
            ServiceError::NotFound(msg) | ServiceError::DependencyUnavailable(msg) => {
                json!({ "detail": msg })
            },
            ServiceError::ShortCodeExhausted(attempts) => {
                error!("Short code space exhausted after {} attempts", attempts);
                json!({ "detail": "Could not allocate a short code, try again" })
            },
            ServiceError::DatabaseError(msg) => {
                error!("Database error: {}", msg);
                json!({ "detail": "Internal server error" })
            },
            ServiceError::InternalError => json!({ "detail": "Internal server error" }),
        };

        (status, Json(body)).into_response()
    }
}

// Conversion from various error types
impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        ServiceError::DatabaseError(error.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(error: validator::ValidationErrors) -> Self {
        ServiceError::from_validation("body", &error)
    }
}

impl From<UrlValidationError> for ServiceError {
    fn from(error: UrlValidationError) -> Self {
        ServiceError::Validation(vec![FieldError::new(
            &["body", "original_url"],
            error.to_string(),
            format!("value_error.{}", error.kind()),
        )])
    }
}

impl From<ShortCodeError> for ServiceError {
    fn from(error: ShortCodeError) -> Self {
        error!("Short code generation failed: {}", error);
        ServiceError::InternalError
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(vec![FieldError::new(
            &["body"],
            rejection.body_text(),
            "value_error.json",
        )])
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::Validation(vec![FieldError::new(
            &["query"],
            rejection.body_text(),
            "type_error.query",
        )])
    }
}
