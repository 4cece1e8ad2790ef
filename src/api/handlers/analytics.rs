use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::actor::AuthActor;
use crate::api::dtos::requests::AnalyticsQuery;
use crate::domain::services::analytics::{self, HoursWindow};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{TimeZone, Utc};

pub async fn event_analytics(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .filter(|e| e.created_by == actor.id)
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let total_guests = state.guest_repo.count_by_event(&event.id).await?;
    let rows = state.activity_repo.list_by_event(&event.id).await?;

    let reference = params
        .date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_else(Utc::now);

    let window = HoursWindow {
        start: state.config.business_hours_start,
        end: state.config.business_hours_end,
    };

    let summary = analytics::build_summary(total_guests, &rows, window, reference)?;
    Ok(Json(summary))
}
