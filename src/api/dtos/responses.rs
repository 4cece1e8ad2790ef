use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::models::guest::Guest;
use crate::domain::services::attendance::AttendanceState;

#[derive(Serialize)]
pub struct CheckInResponse {
    pub message: String,
    pub status: String,
    pub guest_name: String,
    pub check_in_time: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct CheckOutResponse {
    pub message: String,
    pub guest_name: String,
    pub check_out_time: DateTime<Utc>,
    pub duration_hours: f64,
}

#[derive(Serialize)]
pub struct ResolvedEventContext {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
}

/// The QR scan landing view: guest, event context, derived attendance state.
#[derive(Serialize)]
pub struct ResolvedGuestResponse {
    pub name: String,
    pub email: Option<String>,
    pub tags: String,
    pub event: ResolvedEventContext,
    pub status: AttendanceState,
    #[serde(rename = "lastActivity")]
    pub last_activity: Option<DateTime<Utc>>,
    pub qr_token: String,
}

#[derive(Serialize)]
pub struct BulkImportResponse {
    pub added: Vec<Guest>,
    pub failed: i64,
}
