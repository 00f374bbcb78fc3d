//! Shared fixtures for the API test suites: a mock-backed application
//! state, signed session tokens, and request plumbing.

#![cfg(feature = "web-axum")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

use api_adapters::metrics::Metrics;
use api_adapters::state::AppState;
use auth_adapters::{jwt, AuthService};
use domains::models::{
    Article, AuthorRef, ChatMessage, ForumCategory, ForumPost, ForumThread, Role, UserBan,
    UserIdentity,
};
use domains::ports::{
    MockArchiveRepo, MockArticleRepo, MockBanRepo, MockChatRepo, MockDailyTopicRepo,
    MockForumRepo, MockMailer, MockPageRepo, MockSubscriberRepo, MockTalentRepo, MockTeamRepo,
    MockUserRepo,
};
use domains::Bilingual;
use services::{AccessGate, ChatService, ContentService, ForumService, NewsletterService};

pub const SECRET: &[u8] = b"integration-test-secret";

/// Every repository the application wires, as overridable mocks. Tests set
/// expectations on the ones their endpoint touches and leave the rest at
/// their strict defaults.
#[derive(Default)]
pub struct Mocks {
    pub articles: MockArticleRepo,
    pub topics: MockDailyTopicRepo,
    pub talents: MockTalentRepo,
    pub archive: MockArchiveRepo,
    pub team: MockTeamRepo,
    pub pages: MockPageRepo,
    pub subscribers: MockSubscriberRepo,
    pub forum: MockForumRepo,
    pub chat: MockChatRepo,
    pub bans: MockBanRepo,
    pub users: MockUserRepo,
    pub newsletter_subscribers: MockSubscriberRepo,
    pub mailer: MockMailer,
}

pub fn state(mocks: Mocks) -> AppState {
    let gate = AccessGate::new(Arc::new(mocks.bans));
    let content = ContentService::new(
        Arc::new(mocks.articles),
        Arc::new(mocks.topics),
        Arc::new(mocks.talents),
        Arc::new(mocks.archive),
        Arc::new(mocks.team),
        Arc::new(mocks.pages),
        Arc::new(mocks.subscribers),
        gate.clone(),
    );
    let newsletter = NewsletterService::new(
        Arc::new(mocks.newsletter_subscribers),
        Arc::new(mocks.mailer),
        "admin@hromada.example".into(),
    )
    .with_batch_delay(std::time::Duration::ZERO);

    AppState {
        content,
        forum: ForumService::new(Arc::new(mocks.forum), gate.clone()),
        chat: ChatService::new(Arc::new(mocks.chat), gate.clone()),
        newsletter,
        gate,
        auth: AuthService::new(
            Arc::new(mocks.users),
            SecretString::from("integration-test-secret"),
        ),
        metrics: Metrics::new(),
    }
}

pub fn app(mocks: Mocks) -> Router {
    api_adapters::build_router(state(mocks))
}

// ── Identities and tokens ───────────────────────────────────────────────

pub fn member() -> UserIdentity {
    UserIdentity {
        id: Uuid::new_v4(),
        username: "olena".into(),
        email: "olena@example.com".into(),
        role: Role::Member,
    }
}

pub fn admin() -> UserIdentity {
    UserIdentity {
        id: Uuid::new_v4(),
        username: "admin".into(),
        email: "admin@hromada.example".into(),
        role: Role::Admin,
    }
}

pub fn token_for(identity: &UserIdentity) -> String {
    jwt::issue(identity, SECRET, Duration::hours(1)).unwrap()
}

// ── Entity fixtures ─────────────────────────────────────────────────────

pub fn author(identity: &UserIdentity) -> AuthorRef {
    AuthorRef::from(identity)
}

pub fn article() -> Article {
    Article {
        id: Uuid::new_v4(),
        title: Bilingual::new("Заголовок", "Headline"),
        excerpt: Bilingual::new("Короткий опис", "Short summary"),
        content: Bilingual::new("Текст", "Body"),
        pdf_url_uk: None,
        pdf_url_en: None,
        category: Bilingual::new("Культура", "Culture"),
        author_name: Bilingual::new("Олена", "Olena"),
        author_bio: Bilingual::new("", ""),
        author_photo_url: None,
        main_image_url: None,
        read_time_minutes: 4,
        is_featured: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn forum_category() -> ForumCategory {
    ForumCategory {
        id: Uuid::new_v4(),
        name: Bilingual::new("Загальне", "General"),
        description: Bilingual::new("", ""),
        slug: "general".into(),
        display_order: 0,
    }
}

pub fn forum_thread(author: AuthorRef) -> ForumThread {
    ForumThread {
        id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        author,
        title: "Питання".into(),
        content: "Зміст".into(),
        is_pinned: false,
        is_locked: false,
        view_count: 0,
        reply_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn forum_post(thread_id: Uuid, author: AuthorRef) -> ForumPost {
    ForumPost {
        id: Uuid::new_v4(),
        thread_id,
        author,
        content: "Відповідь".into(),
        is_edited: false,
        edited_at: None,
        created_at: Utc::now(),
    }
}

pub fn chat_message(author: AuthorRef) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        author,
        body: "привіт".into(),
        is_deleted: false,
        created_at: Utc::now(),
    }
}

pub fn active_ban(user_id: Uuid) -> UserBan {
    UserBan {
        id: Uuid::new_v4(),
        user_id,
        reason: "spam".into(),
        banned_at: Utc::now(),
        unbanned_at: None,
        is_active: true,
    }
}

// ── Request plumbing ────────────────────────────────────────────────────

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
