// Persistence seam for links and clicks
// Services only ever talk to `dyn LinkStore`; postgres and the in-process
// engine both enforce short-code uniqueness at insert time.

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::models::{Click, ClickRow, Link, NewClick, NewLink};

#[derive(Error, Debug)]
pub enum StoreError {
    /// The unique constraint on `links.short_code` rejected an insert
    #[error("Short code already exists: {0}")]
    DuplicateShortCode(String),

    #[error("Link {0} does not exist")]
    UnknownLink(i64),

    #[error("Database error: {0}")]
    Database(DieselError),

    #[error("Connection pool error: {0}")]
    Pool(String),
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::DuplicateShortCode(info.message().to_string())
            },
            other => StoreError::Database(other),
        }
    }
}

impl From<bb8::RunError<PoolError>> for StoreError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        StoreError::Pool(error.to_string())
    }
}

/// One consistent read of the analytics data for a page of links
#[derive(Debug, Clone, Default)]
pub struct AnalyticsPage {
    /// Total number of links, not just those on the page
    pub total: i64,
    /// Links on the page, newest first
    pub links: Vec<Link>,
    /// Every click belonging to a link on the page
    pub clicks: Vec<ClickRow>,
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Oldest link whose original URL matches exactly
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, StoreError>;

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, StoreError>;

    async fn short_code_exists(&self, short_code: &str) -> Result<bool, StoreError>;

    /// Fails with `StoreError::DuplicateShortCode` when the code is taken
    async fn insert_link(&self, new_link: NewLink) -> Result<Link, StoreError>;

    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError>;

    /// Links ordered by `created_at` desc then `id` desc, sliced by offset/limit
    async fn analytics_page(&self, offset: i64, limit: i64) -> Result<AnalyticsPage, StoreError>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Info;

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"links_short_code_key\""
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("links")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("links_short_code_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate() {
        let err = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(Info));
        assert!(matches!(
            StoreError::from(err),
            StoreError::DuplicateShortCode(_)
        ));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::Database(DieselError::NotFound)
        ));
    }
}
