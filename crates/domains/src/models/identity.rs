//! Signed-in identity and the role claim that replaces any hard-coded
//! administrator address: moderation rights flow from `Role::Admin` on the
//! authenticated identity, never from comparing email strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(crate::DomainError::Validation(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

/// The authenticated caller as seen by services and handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A stored account row, only ever handled by the auth adapter.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub identity: UserIdentity,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Author identity captured at post time. Threads, posts and chat messages
/// keep this snapshot instead of re-fetching the account, so renames after
/// the fact do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&UserIdentity> for AuthorRef {
    fn from(id: &UserIdentity) -> Self {
        Self {
            user_id: id.id,
            username: id.username.clone(),
            email: id.email.clone(),
        }
    }
}
