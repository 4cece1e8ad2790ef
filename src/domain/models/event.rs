use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUS_UPCOMING: &str = "upcoming";
pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: String,
    pub expected_guests: i32,
    pub image_url: String,
    pub status: String, // upcoming, active
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle only ever advances: upcoming -> active. Same-state updates are
/// no-ops and allowed.
pub fn status_transition_allowed(current: &str, next: &str) -> bool {
    match (current, next) {
        (c, n) if c == n => true,
        (STATUS_UPCOMING, STATUS_ACTIVE) => true,
        _ => false,
    }
}
