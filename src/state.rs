use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{ActivityLogRepository, EventRepository, GuestRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub activity_repo: Arc<dyn ActivityLogRepository>,
}
