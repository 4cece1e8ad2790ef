use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::actor::AuthActor;
use crate::api::dtos::responses::{
    CheckInResponse, CheckOutResponse, ResolvedEventContext, ResolvedGuestResponse,
};
use crate::domain::models::activity::{
    ActivityKind, ActivityPayload, ActivityStatus, NewActivityLog, METHOD_QR_CODE,
};
use crate::domain::services::attendance::{self, AttendanceState};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// Public scan landing view: token -> guest identity plus derived state.
/// An unknown token is an expected condition, never a fault.
pub async fn resolve_guest(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_token(&token).await?
        .ok_or(AppError::GuestNotFound { token })?;

    let event = state.event_repo.find_by_id(&guest.event_id).await?
        .ok_or(AppError::Internal)?;

    let latest = state.activity_repo
        .latest_for_guest(&guest.id, &attendance::CHECK_KINDS)
        .await?;

    Ok(Json(ResolvedGuestResponse {
        name: guest.name,
        email: guest.email,
        tags: guest.tags,
        event: ResolvedEventContext {
            id: event.id,
            name: event.name,
            date: event.date,
            location: event.location,
        },
        status: attendance::derive_state(latest.as_ref()),
        last_activity: latest.as_ref().map(attendance::last_activity_time),
        qr_token: guest.token,
    }))
}

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_token(&token).await?
        .ok_or(AppError::GuestNotFound { token })?;

    let latest = state.activity_repo
        .latest_for_guest(&guest.id, &attendance::CHECK_KINDS)
        .await?;

    if attendance::derive_state(latest.as_ref()) == AttendanceState::CheckedIn {
        // precondition failure, not a new fact: no ledger write
        return Err(AppError::AlreadyCheckedIn {
            guest_name: guest.name,
            last_check_in: latest.as_ref().map(attendance::last_check_in_time),
        });
    }

    let now = Utc::now();
    state.activity_repo.append(&NewActivityLog::guest_scoped(
        guest.event_id.clone(),
        guest.id.clone(),
        Some(actor.id),
        ActivityKind::CheckIn,
        ActivityStatus::Completed,
        ActivityPayload::CheckIn {
            method: METHOD_QR_CODE.to_string(),
            check_in_time: now,
        },
        now,
    )).await?;

    info!("Checked in guest {} for event {}", guest.name, guest.event_id);
    Ok(Json(CheckInResponse {
        message: format!("Guest {} checked in successfully", guest.name),
        status: "success".to_string(),
        guest_name: guest.name,
        check_in_time: now,
    }))
}

pub async fn check_out(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_token(&token).await?
        .ok_or(AppError::GuestNotFound { token })?;

    let latest = state.activity_repo
        .latest_for_guest(&guest.id, &attendance::CHECK_KINDS)
        .await?;

    // only an open, completed check-in can be closed
    let open_check_in = match latest {
        Some(entry)
            if entry.kind == ActivityKind::CheckIn
                && entry.status == ActivityStatus::Completed =>
        {
            entry
        }
        _ => {
            return Err(AppError::NotCheckedIn { guest_name: guest.name });
        }
    };

    let checked_in_at = attendance::last_check_in_time(&open_check_in);
    let now = Utc::now();
    let duration_hours = attendance::duration_hours(checked_in_at, now);

    state.activity_repo.append(&NewActivityLog::guest_scoped(
        guest.event_id.clone(),
        guest.id.clone(),
        Some(actor.id),
        ActivityKind::CheckOut,
        ActivityStatus::Completed,
        ActivityPayload::CheckOut {
            method: METHOD_QR_CODE.to_string(),
            check_in_time: checked_in_at,
            check_out_time: now,
            duration_hours,
        },
        now,
    )).await?;

    info!("Checked out guest {} after {:.2}h", guest.name, duration_hours);
    Ok(Json(CheckOutResponse {
        message: format!("Guest {} checked out successfully", guest.name),
        guest_name: guest.name,
        check_out_time: now,
        duration_hours,
    }))
}
