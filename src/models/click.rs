// Click event model: one row per resolved redirect, verdict included

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::link::Link;
use crate::schema::clicks;

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize,
)]
#[diesel(table_name = clicks)]
#[diesel(belongs_to(Link))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clicks)]
pub struct NewClick {
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

/// The slice of a click the analytics aggregation needs
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct ClickRow {
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub is_valid: bool,
}
