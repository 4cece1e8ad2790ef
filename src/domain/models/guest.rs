use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::token;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub tags: String, // comma-joined, required
    pub email: Option<String>,
    pub token: String,
    pub qr_path: String, // opaque render artifact reference, produced elsewhere
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(event_id: String, name: String, tags: String, email: Option<String>) -> Self {
        let token = token::issue();
        let qr_path = format!("static/qr_codes/{}.png", token);

        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            tags,
            email,
            token,
            qr_path,
            created_at: Utc::now(),
        }
    }
}
