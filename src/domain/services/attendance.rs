use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::activity::{ActivityKind, ActivityLog, ActivityStatus};

/// The entry kinds that participate in attendance state derivation.
pub const CHECK_KINDS: [ActivityKind; 2] = [ActivityKind::CheckIn, ActivityKind::CheckOut];

/// Derived per-guest attendance state. Never stored; always computed from the
/// latest check entry in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    NotArrived,
    CheckedIn,
    CheckedOut,
}

/// Last-entry-wins: the most recent check entry decides the state. A guest
/// with no check history has not arrived.
pub fn derive_state(latest: Option<&ActivityLog>) -> AttendanceState {
    match latest {
        Some(entry)
            if entry.kind == ActivityKind::CheckIn
                && entry.status == ActivityStatus::Completed =>
        {
            AttendanceState::CheckedIn
        }
        Some(entry)
            if entry.kind == ActivityKind::CheckOut
                && entry.status == ActivityStatus::Completed =>
        {
            AttendanceState::CheckedOut
        }
        _ => AttendanceState::NotArrived,
    }
}

/// The check-in instant a check entry stands for, preferring the payload
/// timing over the append timestamp.
pub fn last_check_in_time(entry: &ActivityLog) -> DateTime<Utc> {
    entry.check_in_time().unwrap_or(entry.created_at)
}

/// The instant an entry represents for "last activity" displays: check-out
/// time for a check-out, check-in time otherwise.
pub fn last_activity_time(entry: &ActivityLog) -> DateTime<Utc> {
    entry
        .check_out_time()
        .or_else(|| entry.check_in_time())
        .unwrap_or(entry.created_at)
}

/// Visit duration in fractional hours. Non-negative by construction: the
/// check-out instant is taken after the paired check-in at write time.
pub fn duration_hours(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> f64 {
    (check_out - check_in).num_milliseconds().max(0) as f64 / 3_600_000.0
}
