//! State shared across all handlers.

use auth_adapters::AuthService;
use services::{AccessGate, ChatService, ContentService, ForumService, NewsletterService};

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub content: ContentService,
    pub forum: ForumService,
    pub chat: ChatService,
    pub newsletter: NewsletterService,
    pub gate: AccessGate,
    pub auth: AuthService,
    pub metrics: Metrics,
}
