//! # Port traits
//!
//! Contracts every adapter implements. Services depend on these, never on a
//! concrete database or mail client. With the `testing` feature (or inside
//! this crate's own tests) mockall generates `MockXxx` doubles for each port.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DomainResult;
use crate::models::*;
use crate::page::Page;

/// Cap for "related items" queries (same category, current id excluded).
pub const RELATED_LIMIT: i64 = 3;

/// Newest featured articles shown on the front page.
pub const FEATURED_LIMIT: i64 = 4;

/// Default window for the live chat feed.
pub const CHAT_RECENT_LIMIT: i64 = 50;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArticleRepo: Send + Sync {
    /// Fetch by id; absent rows are a `NotFound` error (404 semantics).
    async fn get(&self, id: Uuid) -> DomainResult<Article>;
    async fn list(&self, page: u32) -> DomainResult<Page<Article>>;
    async fn featured(&self, limit: i64) -> DomainResult<Vec<Article>>;
    /// Same category, excluding `exclude_id`, capped at [`RELATED_LIMIT`].
    async fn related(&self, category_uk: &str, exclude_id: Uuid) -> DomainResult<Vec<Article>>;
    /// Insert returns the created row so the caller can navigate to it.
    async fn create(&self, new: NewArticle) -> DomainResult<Article>;
    async fn update(&self, id: Uuid, patch: ArticlePatch) -> DomainResult<Article>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DailyTopicRepo: Send + Sync {
    /// The most recent topic with `date <= today`, if any.
    async fn current(&self, today: NaiveDate) -> DomainResult<Option<DailyTopic>>;
    async fn by_date(&self, date: NaiveDate) -> DomainResult<DailyTopic>;
    async fn list(&self, page: u32) -> DomainResult<Page<DailyTopic>>;
    /// Upsert on the date key: saving twice for one date overwrites.
    async fn upsert(&self, new: NewDailyTopic) -> DomainResult<DailyTopic>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumRepo: Send + Sync {
    async fn categories(&self) -> DomainResult<Vec<ForumCategory>>;
    async fn category_by_slug(&self, slug: &str) -> DomainResult<ForumCategory>;

    async fn threads(&self, category_id: Uuid, page: u32) -> DomainResult<Page<ForumThread>>;
    async fn thread(&self, id: Uuid) -> DomainResult<ForumThread>;
    async fn create_thread(&self, new: NewThread) -> DomainResult<ForumThread>;
    /// Removes the thread and cascade-removes its posts in one transaction.
    async fn delete_thread(&self, id: Uuid) -> DomainResult<()>;
    async fn set_pinned(&self, id: Uuid, pinned: bool) -> DomainResult<ForumThread>;
    async fn set_locked(&self, id: Uuid, locked: bool) -> DomainResult<ForumThread>;
    /// Unconditional `view_count + 1`; not idempotent per viewer.
    async fn record_view(&self, id: Uuid) -> DomainResult<()>;

    async fn posts(&self, thread_id: Uuid) -> DomainResult<Vec<ForumPost>>;
    async fn post(&self, id: Uuid) -> DomainResult<ForumPost>;
    /// Inserts the post and increments the thread's `reply_count` in the
    /// same transaction.
    async fn create_post(&self, new: NewPost) -> DomainResult<ForumPost>;
    /// Deletes the post and decrements `reply_count` in the same transaction.
    async fn delete_post(&self, id: Uuid) -> DomainResult<()>;
    async fn edit_post(&self, id: Uuid, content: &str) -> DomainResult<ForumPost>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ChatRepo: Send + Sync {
    /// Newest `limit` non-deleted messages, returned oldest-first.
    async fn recent(&self, limit: i64) -> DomainResult<Vec<ChatMessage>>;
    async fn get(&self, id: Uuid) -> DomainResult<ChatMessage>;
    async fn insert(&self, author: AuthorRef, body: &str) -> DomainResult<ChatMessage>;
    /// Soft delete: flips `is_deleted`, the row stays.
    async fn soft_delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BanRepo: Send + Sync {
    async fn active_ban(&self, user_id: Uuid) -> DomainResult<Option<UserBan>>;
    /// Deactivates any existing active ban and inserts the new record in one
    /// transaction, so at most one ban is active per user.
    async fn ban(&self, user_id: Uuid, reason: &str) -> DomainResult<UserBan>;
    async fn unban(&self, user_id: Uuid) -> DomainResult<()>;
    async fn history(&self, user_id: Uuid) -> DomainResult<Vec<UserBan>>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> DomainResult<UserIdentity>;
    async fn by_email(&self, email: &str) -> DomainResult<Option<UserRecord>>;
    async fn by_id(&self, id: Uuid) -> DomainResult<UserIdentity>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TalentRepo: Send + Sync {
    async fn categories(&self) -> DomainResult<Vec<TalentCategory>>;
    async fn list(&self, category_id: Option<Uuid>, page: u32) -> DomainResult<Page<Talent>>;
    async fn get(&self, id: Uuid) -> DomainResult<Talent>;
    async fn create(&self, new: NewTalent) -> DomainResult<Talent>;
    async fn update(&self, id: Uuid, new: NewTalent) -> DomainResult<Talent>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArchiveRepo: Send + Sync {
    async fn categories(&self) -> DomainResult<Vec<ArchiveCategory>>;
    async fn documents(
        &self,
        category_id: Option<Uuid>,
        page: u32,
    ) -> DomainResult<Page<ArchiveDocument>>;
    async fn get(&self, id: Uuid) -> DomainResult<ArchiveDocument>;
    async fn create(&self, new: NewArchiveDocument) -> DomainResult<ArchiveDocument>;
    async fn update(&self, id: Uuid, new: NewArchiveDocument) -> DomainResult<ArchiveDocument>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<TeamMember>>;
    async fn create(&self, new: NewTeamMember) -> DomainResult<TeamMember>;
    async fn update(&self, id: Uuid, new: NewTeamMember) -> DomainResult<TeamMember>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PageRepo: Send + Sync {
    async fn by_slug(&self, slug: &str) -> DomainResult<StaticPage>;
    async fn upsert(
        &self,
        slug: &str,
        content_uk: serde_json::Value,
        content_en: serde_json::Value,
    ) -> DomainResult<StaticPage>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubscriberRepo: Send + Sync {
    async fn active(&self) -> DomainResult<Vec<NewsletterSubscriber>>;
    async fn subscribe(&self, email: &str) -> DomainResult<NewsletterSubscriber>;
    async fn unsubscribe(&self, email: &str) -> DomainResult<()>;
}

/// One outbound transactional email.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    /// Optional pre-rendered HTML body.
    pub html: Option<String>,
}

/// Transactional email sender. Implementations return
/// `DomainError::NotConfigured` when the API key is absent.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutboundEmail) -> DomainResult<()>;
}
