//! # services
//!
//! Use-case layer: everything a handler may ask for, expressed against the
//! port traits from `domains`. Authorization lives here; the HTTP layer only
//! translates rejections, it never decides them.

pub mod access;
pub mod chat;
pub mod content;
pub mod forum;
pub mod newsletter;

pub use access::AccessGate;
pub use chat::{ChatFeed, ChatService, PresenceRoster};
pub use content::ContentService;
pub use forum::ForumService;
pub use newsletter::{BroadcastReport, NewsletterService};
