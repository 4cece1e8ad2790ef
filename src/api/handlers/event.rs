use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::actor::AuthActor;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::domain::models::activity::{ActivityKind, NewActivityLog};
use crate::domain::models::event::{self, Event};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.location.trim().is_empty() {
        return Err(AppError::Validation(
            "There is an issue with your form, please check again and fill it correctly".into(),
        ));
    }
    if payload.expected_guests < 0 {
        return Err(AppError::Validation("expected_guests must not be negative".into()));
    }

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        date: payload.date,
        time: payload.time,
        location: payload.location,
        expected_guests: payload.expected_guests,
        image_url: payload.image_url.unwrap_or_else(|| "default_event.jpg".to_string()),
        status: event::STATUS_UPCOMING.to_string(),
        created_by: actor.id.clone(),
        created_at: now,
    };

    let created = state.event_repo.create(&event).await?;

    state.activity_repo.append(&NewActivityLog::event_scoped(
        created.id.clone(),
        Some(actor.id),
        ActivityKind::EventCreated,
        now,
    )).await?;

    info!("Created event {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_owner(&actor.id).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthActor(_actor): AuthActor,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(status) = payload.status {
        if !event::status_transition_allowed(&event.status, &status) {
            return Err(AppError::Validation(
                "Event status can only advance from upcoming to active".into(),
            ));
        }
        event.status = status;
    }
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Event name cannot be empty".into()));
        }
        event.name = name;
    }
    if let Some(date) = payload.date {
        event.date = date;
    }
    if let Some(time) = payload.time {
        event.time = Some(time);
    }
    if let Some(location) = payload.location {
        event.location = location;
    }
    if let Some(expected_guests) = payload.expected_guests {
        event.expected_guests = expected_guests;
    }
    if let Some(image_url) = payload.image_url {
        event.image_url = image_url;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event: {}", event_id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let tombstone = NewActivityLog::event_scoped(
        event.id.clone(),
        Some(actor.id),
        ActivityKind::EventDeleted,
        Utc::now(),
    );
    state.event_repo.delete_cascade(&event.id, &tombstone).await?;

    info!("Deleted event {} with its guests and ledger entries", event_id);
    Ok(Json(serde_json::json!({
        "message": "Event and all associated data deleted successfully"
    })))
}
