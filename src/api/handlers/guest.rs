use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::actor::AuthActor;
use crate::api::dtos::{requests::{CreateGuestRequest, SearchGuestsQuery}, responses::BulkImportResponse};
use crate::domain::models::activity::{ActivityKind, ActivityPayload, ActivityStatus, NewActivityLog};
use crate::domain::models::guest::Guest;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

fn validate_guest_fields(name: &str, tags: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || tags.trim().is_empty() {
        return Err(AppError::Validation("Guest name and tags cannot be empty".into()));
    }
    Ok(())
}

pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_guest_fields(&payload.name, &payload.tags)?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guest = Guest::new(event.id.clone(), payload.name, payload.tags, payload.email);
    let created = state.guest_repo.create(&guest).await?;

    state.activity_repo.append(&NewActivityLog::guest_scoped(
        event.id,
        created.id.clone(),
        Some(actor.id),
        ActivityKind::GuestAdded,
        ActivityStatus::Completed,
        ActivityPayload::Empty,
        Utc::now(),
    )).await?;

    info!("Added guest {} to event {}", created.name, event_id);
    Ok(Json(created))
}

/// Bulk import: each row goes through the same creation path and succeeds or
/// fails on its own; one guest_list_updated entry records the outcome.
pub async fn bulk_add_guests(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
    Json(rows): Json<Vec<CreateGuestRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let mut added = Vec::new();
    let mut failed: i64 = 0;

    for row in rows {
        if validate_guest_fields(&row.name, &row.tags).is_err() {
            warn!("Skipping invalid guest row in bulk import for event {}", event_id);
            failed += 1;
            continue;
        }

        let guest = Guest::new(event.id.clone(), row.name, row.tags, row.email);
        match state.guest_repo.create(&guest).await {
            Ok(created) => {
                state.activity_repo.append(&NewActivityLog::guest_scoped(
                    event.id.clone(),
                    created.id.clone(),
                    Some(actor.id.clone()),
                    ActivityKind::GuestAdded,
                    ActivityStatus::Completed,
                    ActivityPayload::Empty,
                    Utc::now(),
                )).await?;
                added.push(created);
            }
            Err(e) => {
                warn!("Failed to insert guest row in bulk import: {:?}", e);
                failed += 1;
            }
        }
    }

    let status = if failed == 0 { ActivityStatus::Completed } else { ActivityStatus::Failed };
    state.activity_repo.append(&NewActivityLog {
        event_id: event.id.clone(),
        guest_id: None,
        actor_id: Some(actor.id),
        kind: ActivityKind::GuestListUpdated,
        status,
        payload: ActivityPayload::GuestList { added: added.len() as i64 },
        created_at: Utc::now(),
    }).await?;

    info!("Bulk import for event {}: {} added, {} failed", event_id, added.len(), failed);
    Ok(Json(BulkImportResponse { added, failed }))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guests = state.guest_repo.list_by_event(&event.id).await?;
    Ok(Json(guests))
}

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_id(&guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    // logged before the destructive step; the entry outlives the guest
    state.activity_repo.append(&NewActivityLog::guest_scoped(
        guest.event_id.clone(),
        guest.id.clone(),
        Some(actor.id),
        ActivityKind::GuestDeleted,
        ActivityStatus::Completed,
        ActivityPayload::Empty,
        Utc::now(),
    )).await?;

    state.guest_repo.delete(&guest.id).await?;

    info!("Deleted guest: {}", guest_id);
    Ok(Json(serde_json::json!({ "message": "Guest deleted" })))
}

pub async fn search_guests(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Query(params): Query<SearchGuestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let guests = state.guest_repo.search(&actor.id, &params.query).await?;
    Ok(Json(guests))
}
