use crate::domain::{
    models::{activity::NewActivityLog, event::Event},
    ports::EventRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, date, time, location, expected_guests, image_url, status, created_by, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&event.id)
            .bind(&event.name)
            .bind(event.date)
            .bind(&event.time)
            .bind(&event.location)
            .bind(event.expected_guests)
            .bind(&event.image_url)
            .bind(&event.status)
            .bind(&event.created_by)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE created_by = ? ORDER BY date ASC, created_at ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET name=?, date=?, time=?, location=?, expected_guests=?, image_url=?, status=? WHERE id=? RETURNING *",
        )
            .bind(&event.name)
            .bind(event.date)
            .bind(&event.time)
            .bind(&event.location)
            .bind(event.expected_guests)
            .bind(&event.image_url)
            .bind(&event.status)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_cascade(&self, event_id: &str, tombstone: &NewActivityLog) -> Result<(), AppError> {
        let payload_json =
            serde_json::to_string(&tombstone.payload).map_err(|_| AppError::Internal)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO activity_log (event_id, guest_id, actor_id, kind, status, activity_data, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
            .bind(&tombstone.event_id)
            .bind(&tombstone.guest_id)
            .bind(&tombstone.actor_id)
            .bind(tombstone.kind.as_str())
            .bind(tombstone.status.as_str())
            .bind(payload_json)
            .bind(tombstone.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM activity_log WHERE event_id = ?")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM guests WHERE event_id = ?")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
