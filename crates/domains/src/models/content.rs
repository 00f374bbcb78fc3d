//! News, daily topics, talents, archive, team, static pages and the
//! newsletter roll. All share the bilingual-CRUD shape; none carry
//! cross-cutting invariants beyond category linkage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Bilingual;

/// A published news article. Content may be inline text or a per-language
/// PDF reference; both sides of the pair travel together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: Bilingual,
    pub excerpt: Bilingual,
    pub content: Bilingual,
    /// Optional PDF reference per language, used instead of inline content.
    pub pdf_url_uk: Option<String>,
    pub pdf_url_en: Option<String>,
    pub category: Bilingual,
    pub author_name: Bilingual,
    pub author_bio: Bilingual,
    pub author_photo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub read_time_minutes: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: Bilingual,
    pub excerpt: Bilingual,
    pub content: Bilingual,
    pub pdf_url_uk: Option<String>,
    pub pdf_url_en: Option<String>,
    pub category: Bilingual,
    pub author_name: Bilingual,
    pub author_bio: Bilingual,
    pub author_photo_url: Option<String>,
    pub main_image_url: Option<String>,
    pub read_time_minutes: i32,
    pub is_featured: bool,
}

/// Partial patch: only the supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<Bilingual>,
    pub excerpt: Option<Bilingual>,
    pub content: Option<Bilingual>,
    pub category: Option<Bilingual>,
    pub main_image_url: Option<String>,
    pub read_time_minutes: Option<i32>,
    pub is_featured: Option<bool>,
}

/// One topic per calendar date; "today's" topic is the most recent row with
/// `date <= today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTopic {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: Bilingual,
    pub content: Bilingual,
    pub image_url: Option<String>,
    pub read_time_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDailyTopic {
    pub date: NaiveDate,
    pub title: Bilingual,
    pub content: Bilingual,
    pub image_url: Option<String>,
    pub read_time_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentCategory {
    pub id: Uuid,
    pub name: Bilingual,
    pub slug: String,
    pub display_order: i32,
}

/// A showcased community member or act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: Bilingual,
    pub description: Bilingual,
    pub photo_url: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTalent {
    pub category_id: Uuid,
    pub name: Bilingual,
    pub description: Bilingual,
    pub photo_url: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveCategory {
    pub id: Uuid,
    pub name: Bilingual,
    pub slug: String,
    pub display_order: i32,
}

/// A document in the community archive. The file itself lives in object
/// storage; only the reference is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveDocument {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: Bilingual,
    pub description: Bilingual,
    pub file_url: String,
    pub published_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArchiveDocument {
    pub category_id: Uuid,
    pub title: Bilingual,
    pub description: Bilingual,
    pub file_url: String,
    pub published_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: Bilingual,
    pub role: Bilingual,
    pub bio: Bilingual,
    pub photo_url: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeamMember {
    pub name: Bilingual,
    pub role: Bilingual,
    pub bio: Bilingual,
    pub photo_url: Option<String>,
    pub display_order: i32,
}

/// Structured bilingual JSON content for a static page, addressed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub id: Uuid,
    pub slug: String,
    pub content_uk: serde_json::Value,
    pub content_en: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
}
