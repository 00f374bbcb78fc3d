//! # Chat service
//!
//! The live chat is an append-only message log with soft deletion. Events
//! fan out over a broadcast channel; each connected socket forwards them to
//! its client. Senders get no optimistic echo; their own message arrives
//! through the same subscription as everyone else's.
//!
//! Presence is ephemeral: a DashMap of connection id → user id that exists
//! only while sockets are open. It is never persisted and never reconciled
//! with message activity.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use domains::models::{AuthorRef, ChatEvent, ChatMessage, UserIdentity};
use domains::ports::{ChatRepo, CHAT_RECENT_LIMIT};
use domains::{DomainError, DomainResult};

use crate::access::AccessGate;

const EVENT_BUFFER: usize = 256;
const MAX_MESSAGE_LEN: usize = 2_000;

/// Ephemeral roster of open connections. One user may hold several
/// connections (tabs); the online count is distinct users.
#[derive(Clone, Default)]
pub struct PresenceRoster {
    connections: Arc<DashMap<Uuid, Uuid>>,
}

impl PresenceRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, connection_id: Uuid, user_id: Uuid) {
        self.connections.insert(connection_id, user_id);
    }

    pub fn leave(&self, connection_id: Uuid) {
        self.connections.remove(&connection_id);
    }

    pub fn online_count(&self) -> usize {
        let mut users: Vec<Uuid> = self.connections.iter().map(|e| *e.value()).collect();
        users.sort_unstable();
        users.dedup();
        users.len()
    }
}

#[derive(Clone)]
pub struct ChatService {
    repo: Arc<dyn ChatRepo>,
    gate: AccessGate,
    events: broadcast::Sender<ChatEvent>,
    presence: PresenceRoster,
}

impl ChatService {
    pub fn new(repo: Arc<dyn ChatRepo>, gate: AccessGate) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            repo,
            gate,
            events,
            presence: PresenceRoster::new(),
        }
    }

    /// The newest 50 non-deleted messages, oldest first.
    pub async fn recent(&self) -> DomainResult<Vec<ChatMessage>> {
        self.repo.recent(CHAT_RECENT_LIMIT).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// Posting is ban-gated and requires a signed-in identity. The stored
    /// message is broadcast; the HTTP/WS response carries no echo.
    pub async fn post(&self, who: Option<&UserIdentity>, body: &str) -> DomainResult<ChatMessage> {
        let who = self.gate.require_identity(who)?;
        self.gate.require_not_banned(who).await?;
        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::Validation("message is empty".into()));
        }
        if body.chars().count() > MAX_MESSAGE_LEN {
            return Err(DomainError::Validation("message is too long".into()));
        }
        let message = self.repo.insert(AuthorRef::from(who), body).await?;
        // Dropped when no client is connected; delivery is best-effort.
        let _ = self.events.send(ChatEvent::Posted {
            message: message.clone(),
        });
        Ok(message)
    }

    /// Owner-or-admin; flips `is_deleted` and announces the removal.
    pub async fn delete(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        let who = self.gate.require_identity(who)?;
        let message = self.repo.get(id).await?;
        self.gate.owner_or_admin(who, message.author.user_id)?;
        self.repo.soft_delete(id).await?;
        let _ = self.events.send(ChatEvent::Deleted { id });
        Ok(())
    }

    /// Socket opened: register the connection and announce the new count.
    pub fn join(&self, connection_id: Uuid, user_id: Uuid) {
        self.presence.join(connection_id, user_id);
        let _ = self.events.send(ChatEvent::Presence {
            online: self.presence.online_count(),
        });
    }

    /// Socket closed: presence for that connection is gone, nothing persists.
    pub fn leave(&self, connection_id: Uuid) {
        self.presence.leave(connection_id);
        let _ = self.events.send(ChatEvent::Presence {
            online: self.presence.online_count(),
        });
    }

    pub fn online_count(&self) -> usize {
        self.presence.online_count()
    }
}

/// Client-side view of the feed: a keyed map applied as a diff. Redelivered
/// inserts overwrite instead of double-appending, and a delete arriving
/// before its insert is remembered, so out-of-order delivery converges.
#[derive(Debug, Default)]
pub struct ChatFeed {
    messages: HashMap<Uuid, ChatMessage>,
    tombstones: std::collections::HashSet<Uuid>,
}

impl ChatFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an initial `recent()` snapshot.
    pub fn seed(&mut self, snapshot: Vec<ChatMessage>) {
        for message in snapshot {
            self.apply(ChatEvent::Posted { message });
        }
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Posted { message } => {
                if message.is_deleted || self.tombstones.contains(&message.id) {
                    return;
                }
                self.messages.insert(message.id, message);
            }
            ChatEvent::Deleted { id } => {
                self.messages.remove(&id);
                self.tombstones.insert(id);
            }
            ChatEvent::Presence { .. } => {}
        }
    }

    /// Messages in display order, capped to the feed window.
    pub fn render(&self) -> Vec<&ChatMessage> {
        let mut items: Vec<&ChatMessage> = self.messages.values().collect();
        items.sort_by_key(|m| (m.created_at, m.id));
        let excess = items.len().saturating_sub(CHAT_RECENT_LIMIT as usize);
        items.split_off(excess)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
