use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Guest not found")]
    GuestNotFound { token: String },
    #[error("{guest_name} is already checked in")]
    AlreadyCheckedIn {
        guest_name: String,
        last_check_in: Option<DateTime<Utc>>,
    },
    #[error("{guest_name} is not checked in")]
    NotCheckedIn { guest_name: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if code == "2067" || code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }

                    // 787 = SQLite FK Constraint, 23503 = PostgreSQL FK Violation.
                    // A ledger append referencing a missing event cannot happen
                    // while the store invariants hold; surface it loudly.
                    if code == "787" || code == "23503" {
                        error!("Referential integrity violation: {:?}", e);
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({ "error": "Internal server error" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::GuestNotFound { token } => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "GUEST_NOT_FOUND",
                        "message": "Guest not found",
                        "qr_token": token,
                    }))
                ).into_response();
            }
            AppError::AlreadyCheckedIn { guest_name, last_check_in } => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "ALREADY_CHECKED_IN",
                        "message": format!("{} is already checked in", guest_name),
                        "guest_name": guest_name,
                        "last_check_in": last_check_in,
                    }))
                ).into_response();
            }
            AppError::NotCheckedIn { guest_name } => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "NOT_CHECKED_IN",
                        "message": format!("{} is not checked in", guest_name),
                        "guest_name": guest_name,
                    }))
                ).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
