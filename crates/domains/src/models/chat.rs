//! Live chat entities and the event stream clients reconcile against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorRef;

/// One chat message. Chat is soft-delete only: reads filter on `is_deleted`,
/// the row stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: AuthorRef,
    pub body: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Events pushed to every connected chat client. Delivery is at-least-once
/// and unordered from the client's point of view; consumers must reconcile
/// by message id rather than blindly appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    Posted { message: ChatMessage },
    Deleted { id: Uuid },
    /// Distinct-user count of the ephemeral presence roster.
    Presence { online: usize },
}
