//! One module per resource family. Handlers deserialize, call exactly one
//! service method, and serialize; every access decision happens below them.

pub mod auth;
pub mod chat;
pub mod content;
pub mod forum;
pub mod mail;
pub mod moderation;

use serde::Deserialize;

/// `?page=` query shared by every paginated listing, 1-based.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
