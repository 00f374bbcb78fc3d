//! # Access gate
//!
//! Authorization for every write-capable action: is there a signed-in
//! identity, does it carry the admin role claim, and is it free of an active
//! ban. Bans gate writes only, never reads; previously authored content stays
//! visible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domains::models::{UserBan, UserIdentity};
use domains::ports::BanRepo;
use domains::{DomainError, DomainResult};

#[derive(Clone)]
pub struct AccessGate {
    bans: Arc<dyn BanRepo>,
}

impl AccessGate {
    pub fn new(bans: Arc<dyn BanRepo>) -> Self {
        Self { bans }
    }

    /// A signed-in identity, or `Unauthorized`.
    pub fn require_identity<'a>(
        &self,
        who: Option<&'a UserIdentity>,
    ) -> DomainResult<&'a UserIdentity> {
        who.ok_or_else(|| DomainError::Unauthorized("sign in required".into()))
    }

    /// A signed-in identity carrying the admin role claim, or `Forbidden`.
    /// The claim replaces comparing the caller's email to a literal address:
    /// admins can be added or revoked without a code change.
    pub fn require_admin<'a>(
        &self,
        who: Option<&'a UserIdentity>,
    ) -> DomainResult<&'a UserIdentity> {
        let who = self.require_identity(who)?;
        if who.is_admin() {
            Ok(who)
        } else {
            Err(DomainError::Forbidden("admin role required".into()))
        }
    }

    /// True for the owner of a record or any admin. Used for post and chat
    /// message deletion.
    pub fn owner_or_admin(&self, who: &UserIdentity, owner_id: Uuid) -> DomainResult<()> {
        if who.id == owner_id || who.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("only the author or an admin may do this".into()))
        }
    }

    /// Rejects with `Banned` (carrying stored reason and timestamp) when the
    /// user has an active ban row.
    pub async fn require_not_banned(&self, who: &UserIdentity) -> DomainResult<()> {
        match self.bans.active_ban(who.id).await? {
            Some(ban) => Err(DomainError::Banned {
                reason: ban.reason,
                banned_at: ban.banned_at,
            }),
            None => Ok(()),
        }
    }

    /// The active ban row for rendering the banned notice, if any.
    pub async fn ban_notice(&self, user_id: Uuid) -> DomainResult<Option<UserBan>> {
        self.bans.active_ban(user_id).await
    }

    pub async fn ban_user(
        &self,
        who: Option<&UserIdentity>,
        user_id: Uuid,
        reason: &str,
    ) -> DomainResult<UserBan> {
        let admin = self.require_admin(who)?;
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("ban reason is required".into()));
        }
        let ban = self.bans.ban(user_id, reason.trim()).await?;
        tracing::info!(admin = %admin.id, banned = %user_id, "user banned");
        Ok(ban)
    }

    pub async fn unban_user(&self, who: Option<&UserIdentity>, user_id: Uuid) -> DomainResult<()> {
        let admin = self.require_admin(who)?;
        self.bans.unban(user_id).await?;
        tracing::info!(admin = %admin.id, unbanned = %user_id, "user unbanned");
        Ok(())
    }

    pub async fn ban_history(
        &self,
        who: Option<&UserIdentity>,
        user_id: Uuid,
    ) -> DomainResult<Vec<UserBan>> {
        self.require_admin(who)?;
        self.bans.history(user_id).await
    }
}

/// Convenience for tests and handlers that render the notice.
pub fn banned_notice_text(reason: &str, banned_at: DateTime<Utc>) -> String {
    format!("You are banned since {}: {}", banned_at.format("%Y-%m-%d %H:%M"), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::Role;
    use domains::ports::MockBanRepo;

    fn member() -> UserIdentity {
        UserIdentity {
            id: Uuid::new_v4(),
            username: "olena".into(),
            email: "olena@example.com".into(),
            role: Role::Member,
        }
    }

    fn admin() -> UserIdentity {
        UserIdentity {
            id: Uuid::new_v4(),
            username: "ivan".into(),
            email: "ivan@example.com".into(),
            role: Role::Admin,
        }
    }

    fn gate(bans: MockBanRepo) -> AccessGate {
        AccessGate::new(Arc::new(bans))
    }

    #[test]
    fn anonymous_is_unauthorized() {
        let g = gate(MockBanRepo::new());
        assert!(matches!(
            g.require_identity(None),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn member_is_not_admin() {
        let g = gate(MockBanRepo::new());
        let m = member();
        assert!(matches!(
            g.require_admin(Some(&m)),
            Err(DomainError::Forbidden(_))
        ));
        let a = admin();
        assert!(g.require_admin(Some(&a)).is_ok());
    }

    #[test]
    fn owner_or_admin_rejects_strangers() {
        let g = gate(MockBanRepo::new());
        let m = member();
        let other = Uuid::new_v4();
        assert!(g.owner_or_admin(&m, m.id).is_ok());
        assert!(g.owner_or_admin(&admin(), other).is_ok());
        assert!(matches!(
            g.owner_or_admin(&m, other),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn active_ban_carries_reason_and_timestamp() {
        let m = member();
        let banned_at = Utc::now();
        let mut bans = MockBanRepo::new();
        let uid = m.id;
        bans.expect_active_ban().returning(move |_| {
            Ok(Some(UserBan {
                id: Uuid::new_v4(),
                user_id: uid,
                reason: "spam".into(),
                banned_at,
                unbanned_at: None,
                is_active: true,
            }))
        });

        let g = gate(bans);
        match g.require_not_banned(&m).await {
            Err(DomainError::Banned { reason, banned_at: at }) => {
                assert_eq!(reason, "spam");
                assert_eq!(at, banned_at);
            }
            other => panic!("expected Banned, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ban_requires_admin_and_reason() {
        let mut bans = MockBanRepo::new();
        bans.expect_ban().never();
        let g = gate(bans);
        let m = member();

        let res = g.ban_user(Some(&m), Uuid::new_v4(), "spam").await;
        assert!(matches!(res, Err(DomainError::Forbidden(_))));

        let a = admin();
        let res = g.ban_user(Some(&a), Uuid::new_v4(), "   ").await;
        assert!(matches!(res, Err(DomainError::Validation(_))));
    }
}
