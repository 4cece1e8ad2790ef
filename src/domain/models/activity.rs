use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const METHOD_QR_CODE: &str = "qr_code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    EventCreated,
    EventDeleted,
    GuestAdded,
    GuestDeleted,
    CheckIn,
    CheckOut,
    GuestListUpdated,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::EventCreated => "event_created",
            ActivityKind::EventDeleted => "event_deleted",
            ActivityKind::GuestAdded => "guest_added",
            ActivityKind::GuestDeleted => "guest_deleted",
            ActivityKind::CheckIn => "check_in",
            ActivityKind::CheckOut => "check_out",
            ActivityKind::GuestListUpdated => "guest_list_updated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "event_created" => Some(ActivityKind::EventCreated),
            "event_deleted" => Some(ActivityKind::EventDeleted),
            "guest_added" => Some(ActivityKind::GuestAdded),
            "guest_deleted" => Some(ActivityKind::GuestDeleted),
            "check_in" => Some(ActivityKind::CheckIn),
            "check_out" => Some(ActivityKind::CheckOut),
            "guest_list_updated" => Some(ActivityKind::GuestListUpdated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Completed => "completed",
            ActivityStatus::Pending => "pending",
            ActivityStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(ActivityStatus::Completed),
            "pending" => Some(ActivityStatus::Pending),
            "failed" => Some(ActivityStatus::Failed),
            _ => None,
        }
    }
}

/// Structured payload attached to a ledger entry, one shape per kind family.
/// Serialized as JSON into the activity_data column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityPayload {
    CheckIn {
        method: String,
        check_in_time: DateTime<Utc>,
    },
    CheckOut {
        method: String,
        check_in_time: DateTime<Utc>,
        check_out_time: DateTime<Utc>,
        duration_hours: f64,
    },
    GuestList {
        added: i64,
    },
    Empty,
}

/// One immutable row of the attendance ledger. The id is database-assigned
/// and strictly increasing within an installation.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLog {
    pub id: i64,
    pub event_id: String,
    pub guest_id: Option<String>,
    pub actor_id: Option<String>,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    pub payload: ActivityPayload,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    /// The check-in instant recorded in the payload, if this entry carries one.
    pub fn check_in_time(&self) -> Option<DateTime<Utc>> {
        match &self.payload {
            ActivityPayload::CheckIn { check_in_time, .. } => Some(*check_in_time),
            ActivityPayload::CheckOut { check_in_time, .. } => Some(*check_in_time),
            _ => None,
        }
    }

    pub fn check_out_time(&self) -> Option<DateTime<Utc>> {
        match &self.payload {
            ActivityPayload::CheckOut { check_out_time, .. } => Some(*check_out_time),
            _ => None,
        }
    }

    pub fn method(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::CheckIn { method, .. } => Some(method),
            ActivityPayload::CheckOut { method, .. } => Some(method),
            _ => None,
        }
    }
}

/// A ledger entry before the database has assigned its id. The caller supplies
/// the timestamp so payload timing and created_at agree.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub event_id: String,
    pub guest_id: Option<String>,
    pub actor_id: Option<String>,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    pub payload: ActivityPayload,
    pub created_at: DateTime<Utc>,
}

impl NewActivityLog {
    pub fn event_scoped(
        event_id: String,
        actor_id: Option<String>,
        kind: ActivityKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            guest_id: None,
            actor_id,
            kind,
            status: ActivityStatus::Completed,
            payload: ActivityPayload::Empty,
            created_at: now,
        }
    }

    pub fn guest_scoped(
        event_id: String,
        guest_id: String,
        actor_id: Option<String>,
        kind: ActivityKind,
        status: ActivityStatus,
        payload: ActivityPayload,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            guest_id: Some(guest_id),
            actor_id,
            kind,
            status,
            payload,
            created_at: now,
        }
    }
}

/// Ledger row joined with the guest's current name (None once the guest is
/// deleted), as served to the analytics feed.
#[derive(Debug, Clone)]
pub struct ActivityFeedRow {
    pub entry: ActivityLog,
    pub guest_name: Option<String>,
}
