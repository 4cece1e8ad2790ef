use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: String,
    pub expected_guests: i32,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub expected_guests: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    #[serde(default)]
    pub tags: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchGuestsQuery {
    pub query: String,
}

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    /// Reference day for the hourly histogram; defaults to today.
    pub date: Option<NaiveDate>,
}
