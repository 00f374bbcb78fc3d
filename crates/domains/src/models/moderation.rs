//! Moderation records. A user keeps their full ban history; at most one
//! record is active at a time (the repository deactivates the previous one
//! inside the same transaction that inserts a new ban).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reason: String,
    pub banned_at: DateTime<Utc>,
    pub unbanned_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
