use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::error;

use crate::domain::models::activity::{ActivityFeedRow, ActivityKind, ActivityStatus};
use crate::domain::services::attendance::{self, AttendanceState};
use crate::error::AppError;

/// Business-hours window for the check-in histogram, in whole hours of the
/// reference day. Default 9..17 gives eight one-hour buckets.
#[derive(Debug, Clone, Copy)]
pub struct HoursWindow {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Serialize)]
pub struct HourBucket {
    pub hour: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub guest_name: Option<String>,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub method: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub checked_in: i64,
    pub checked_out: i64,
    pub pending: i64,
    pub total_guests: i64,
    pub check_in_times: Vec<HourBucket>,
    pub activity_logs: Vec<FeedEntry>,
}

/// Builds the event summary from a single ledger scan. `rows` must be newest
/// first (the ledger's list order); per-guest state is then first-seen-wins.
/// Pending is derived by subtraction, never by a second count query.
pub fn build_summary(
    total_guests: i64,
    rows: &[ActivityFeedRow],
    window: HoursWindow,
    reference: DateTime<Utc>,
) -> Result<AttendanceSummary, AppError> {
    let mut states: HashMap<&str, AttendanceState> = HashMap::new();
    for row in rows {
        let entry = &row.entry;
        if !attendance::CHECK_KINDS.contains(&entry.kind) {
            continue;
        }
        // entries of since-deleted guests (no name join) stay in the feed but
        // must not count against the live guest total
        if row.guest_name.is_none() {
            continue;
        }
        if let Some(guest_id) = entry.guest_id.as_deref() {
            states
                .entry(guest_id)
                .or_insert_with(|| attendance::derive_state(Some(entry)));
        }
    }

    let checked_in = states.values().filter(|s| **s == AttendanceState::CheckedIn).count() as i64;
    let checked_out = states.values().filter(|s| **s == AttendanceState::CheckedOut).count() as i64;
    let pending = total_guests - checked_in - checked_out;
    if pending < 0 {
        error!(
            total_guests,
            checked_in, checked_out, "attendance counts exceed guest total"
        );
        return Err(AppError::Internal);
    }

    let day = reference.date_naive();
    let mut check_in_times = Vec::with_capacity((window.end.saturating_sub(window.start)) as usize);
    for hour in window.start..window.end {
        let bucket_start = match day.and_hms_opt(hour, 0, 0) {
            Some(naive) => Utc.from_utc_datetime(&naive),
            None => continue,
        };
        let bucket_end = bucket_start + Duration::hours(1);

        let count = rows
            .iter()
            .filter(|row| {
                row.entry.kind == ActivityKind::CheckIn
                    && row.entry.status == ActivityStatus::Completed
            })
            .filter_map(|row| row.entry.check_in_time())
            .filter(|t| *t >= bucket_start && *t < bucket_end)
            .count() as i64;

        check_in_times.push(HourBucket {
            hour: hour_label(hour),
            count,
        });
    }

    let activity_logs = rows
        .iter()
        .map(|row| FeedEntry {
            guest_name: row.guest_name.clone(),
            kind: row.entry.kind,
            status: row.entry.status,
            check_in_time: row.entry.check_in_time(),
            check_out_time: row.entry.check_out_time(),
            method: row.entry.method().map(|m| m.to_string()),
            timestamp: attendance::last_activity_time(&row.entry),
        })
        .collect();

    Ok(AttendanceSummary {
        checked_in,
        checked_out,
        pending,
        total_guests,
        check_in_times,
        activity_logs,
    })
}

fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::activity::{ActivityLog, ActivityPayload, METHOD_QR_CODE};

    fn feed_row(
        id: i64,
        guest_id: &str,
        kind: ActivityKind,
        at: DateTime<Utc>,
    ) -> ActivityFeedRow {
        let payload = match kind {
            ActivityKind::CheckIn => ActivityPayload::CheckIn {
                method: METHOD_QR_CODE.to_string(),
                check_in_time: at,
            },
            ActivityKind::CheckOut => ActivityPayload::CheckOut {
                method: METHOD_QR_CODE.to_string(),
                check_in_time: at - Duration::hours(1),
                check_out_time: at,
                duration_hours: 1.0,
            },
            _ => ActivityPayload::Empty,
        };
        ActivityFeedRow {
            entry: ActivityLog {
                id,
                event_id: "evt-1".to_string(),
                guest_id: Some(guest_id.to_string()),
                actor_id: None,
                kind,
                status: ActivityStatus::Completed,
                payload,
                created_at: at,
            },
            guest_name: Some(format!("Guest {}", guest_id)),
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    const WINDOW: HoursWindow = HoursWindow { start: 9, end: 17 };

    #[test]
    fn test_counts_are_per_guest_not_per_entry() {
        let base = reference();
        // g1: in/out/in (currently in), g2: in/out, g3: never scanned.
        // Newest first, as the ledger serves them.
        let rows = vec![
            feed_row(5, "g1", ActivityKind::CheckIn, base + Duration::minutes(30)),
            feed_row(4, "g2", ActivityKind::CheckOut, base + Duration::minutes(20)),
            feed_row(3, "g1", ActivityKind::CheckOut, base + Duration::minutes(15)),
            feed_row(2, "g2", ActivityKind::CheckIn, base + Duration::minutes(10)),
            feed_row(1, "g1", ActivityKind::CheckIn, base),
        ];

        let summary = build_summary(3, &rows, WINDOW, base).unwrap();
        assert_eq!(summary.checked_in, 1);
        assert_eq!(summary.checked_out, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.total_guests, 3);
    }

    #[test]
    fn test_histogram_buckets_check_ins_by_hour() {
        let base = reference(); // 12:00
        let rows = vec![
            feed_row(3, "g3", ActivityKind::CheckIn, base + Duration::minutes(59)), // 12h bucket
            feed_row(2, "g2", ActivityKind::CheckIn, base + Duration::minutes(5)),  // 12h bucket
            feed_row(1, "g1", ActivityKind::CheckIn, base - Duration::hours(3)),    // 9h bucket
        ];

        let summary = build_summary(3, &rows, WINDOW, base).unwrap();
        assert_eq!(summary.check_in_times.len(), 8);
        assert_eq!(summary.check_in_times[0].hour, "9 AM");
        assert_eq!(summary.check_in_times[0].count, 1);
        assert_eq!(summary.check_in_times[3].hour, "12 PM");
        assert_eq!(summary.check_in_times[3].count, 2);
        assert_eq!(summary.check_in_times[7].hour, "4 PM");
        assert_eq!(summary.check_in_times[7].count, 0);
    }

    #[test]
    fn test_check_out_entries_do_not_feed_the_histogram() {
        let base = reference();
        let rows = vec![feed_row(1, "g1", ActivityKind::CheckOut, base)];
        let summary = build_summary(1, &rows, WINDOW, base).unwrap();
        assert!(summary.check_in_times.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_deleted_guests_do_not_count_against_live_total() {
        let base = reference();
        let mut deleted = feed_row(2, "gone", ActivityKind::CheckIn, base);
        deleted.guest_name = None;
        let rows = vec![deleted, feed_row(1, "g1", ActivityKind::CheckIn, base)];

        let summary = build_summary(1, &rows, WINDOW, base).unwrap();
        assert_eq!(summary.checked_in, 1);
        assert_eq!(summary.pending, 0);
        // the orphaned entry still shows in the feed
        assert_eq!(summary.activity_logs.len(), 2);
    }

    #[test]
    fn test_negative_pending_is_a_data_fault() {
        let base = reference();
        let rows = vec![
            feed_row(2, "g2", ActivityKind::CheckIn, base),
            feed_row(1, "g1", ActivityKind::CheckIn, base),
        ];
        // Ledger claims two checked-in guests but the event only has one.
        assert!(build_summary(1, &rows, WINDOW, base).is_err());
    }

    #[test]
    fn test_feed_preserves_order_and_carries_payload_fields() {
        let base = reference();
        let rows = vec![
            feed_row(2, "g1", ActivityKind::CheckOut, base + Duration::hours(1)),
            feed_row(1, "g1", ActivityKind::CheckIn, base),
        ];
        let summary = build_summary(1, &rows, WINDOW, base).unwrap();
        assert_eq!(summary.activity_logs.len(), 2);
        assert_eq!(summary.activity_logs[0].kind, ActivityKind::CheckOut);
        assert!(summary.activity_logs[0].check_out_time.is_some());
        assert_eq!(summary.activity_logs[0].method.as_deref(), Some(METHOD_QR_CODE));
        assert_eq!(summary.activity_logs[1].kind, ActivityKind::CheckIn);
        assert!(summary.activity_logs[1].check_out_time.is_none());
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(16), "4 PM");
    }
}
