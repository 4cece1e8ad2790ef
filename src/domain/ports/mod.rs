use crate::domain::models::{
    activity::{ActivityFeedRow, ActivityKind, ActivityLog, NewActivityLog},
    event::Event,
    guest::Guest,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Removes the event together with its guests and ledger entries in one
    /// transaction: entries first, then guests, then the event. The tombstone
    /// entry is written before any destructive step.
    async fn delete_cascade(&self, event_id: &str, tombstone: &NewActivityLog) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    /// Case-insensitive substring match against name, email or tags, limited
    /// to guests of events owned by the given actor.
    async fn search(&self, owner_id: &str, query: &str) -> Result<Vec<Guest>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Appends one entry and returns it with its database-assigned id.
    /// Entries are immutable from this point on.
    async fn append(&self, entry: &NewActivityLog) -> Result<ActivityLog, AppError>;
    /// Most recent entry for the guest among the given kinds, newest first by
    /// created_at, ties broken by id (newest-inserted wins).
    async fn latest_for_guest(
        &self,
        guest_id: &str,
        kinds: &[ActivityKind],
    ) -> Result<Option<ActivityLog>, AppError>;
    /// Every entry for the event, newest first, joined with guest names.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<ActivityFeedRow>, AppError>;
}
