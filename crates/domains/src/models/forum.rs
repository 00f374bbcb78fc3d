//! Forum entities. Threads carry two independent moderation axes
//! (pinned, locked) and two denormalized counters; `reply_count` must equal
//! the live count of posts under the thread, maintained in the same
//! transaction as the post write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Bilingual;

use super::AuthorRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumCategory {
    pub id: Uuid,
    pub name: Bilingual,
    pub description: Bilingual,
    /// Unique, used for routing (`/forum/{slug}`).
    pub slug: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: Uuid,
    pub category_id: Uuid,
    pub author: AuthorRef,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    /// Incremented once per detail load, unbounded by viewer identity.
    pub view_count: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThread {
    pub category_id: Uuid,
    pub author: AuthorRef,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author: AuthorRef,
    pub content: String,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub thread_id: Uuid,
    pub author: AuthorRef,
    pub content: String,
}
