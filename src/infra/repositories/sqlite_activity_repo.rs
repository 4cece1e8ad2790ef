use crate::domain::{
    models::activity::{
        ActivityFeedRow, ActivityKind, ActivityLog, ActivityStatus, NewActivityLog,
    },
    ports::ActivityLogRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::error;

pub struct SqliteActivityLogRepo {
    pool: SqlitePool,
}

impl SqliteActivityLogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_log(row: &SqliteRow) -> Result<ActivityLog, AppError> {
    let kind_raw: String = row.get("kind");
    let status_raw: String = row.get("status");
    let data_raw: String = row.get("activity_data");

    let kind = ActivityKind::parse(&kind_raw).ok_or_else(|| {
        error!(kind = %kind_raw, "unknown activity kind in ledger");
        AppError::Internal
    })?;
    let status = ActivityStatus::parse(&status_raw).ok_or_else(|| {
        error!(status = %status_raw, "unknown activity status in ledger");
        AppError::Internal
    })?;
    let payload = serde_json::from_str(&data_raw).map_err(|e| {
        error!("malformed activity payload in ledger: {}", e);
        AppError::Internal
    })?;

    Ok(ActivityLog {
        id: row.get("id"),
        event_id: row.get("event_id"),
        guest_id: row.get("guest_id"),
        actor_id: row.get("actor_id"),
        kind,
        status,
        payload,
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ActivityLogRepository for SqliteActivityLogRepo {
    async fn append(&self, entry: &NewActivityLog) -> Result<ActivityLog, AppError> {
        let payload_json =
            serde_json::to_string(&entry.payload).map_err(|_| AppError::Internal)?;

        let row = sqlx::query(
            "INSERT INTO activity_log (event_id, guest_id, actor_id, kind, status, activity_data, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&entry.event_id)
            .bind(&entry.guest_id)
            .bind(&entry.actor_id)
            .bind(entry.kind.as_str())
            .bind(entry.status.as_str())
            .bind(payload_json)
            .bind(entry.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        row_to_log(&row)
    }

    async fn latest_for_guest(
        &self,
        guest_id: &str,
        kinds: &[ActivityKind],
    ) -> Result<Option<ActivityLog>, AppError> {
        if kinds.is_empty() {
            return Ok(None);
        }

        // kinds come from the enum, never from user input
        let kind_list = kinds
            .iter()
            .map(|k| format!("'{}'", k.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT * FROM activity_log WHERE guest_id = ? AND kind IN ({}) ORDER BY created_at DESC, id DESC LIMIT 1",
            kind_list
        );

        let row = sqlx::query(&sql)
            .bind(guest_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        row.as_ref().map(row_to_log).transpose()
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<ActivityFeedRow>, AppError> {
        let rows = sqlx::query(
            "SELECT a.*, g.name AS guest_name FROM activity_log a
             LEFT JOIN guests g ON g.id = a.guest_id
             WHERE a.event_id = ?
             ORDER BY a.created_at DESC, a.id DESC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        rows.iter()
            .map(|row| {
                Ok(ActivityFeedRow {
                    entry: row_to_log(row)?,
                    guest_name: row.get("guest_name"),
                })
            })
            .collect()
    }
}
