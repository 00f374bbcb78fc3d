//! # Forum service
//!
//! Thread/post use cases plus the moderation flag space. Pinned and locked
//! are two independent axes toggled by admins; neither transitions on its
//! own. Counters ride the repository transaction of the write that changes
//! them, so a failed insert never leaves a drifted `reply_count`.

use std::sync::Arc;

use uuid::Uuid;

use domains::models::{
    AuthorRef, ForumCategory, ForumPost, ForumThread, NewPost, NewThread, UserIdentity,
};
use domains::ports::ForumRepo;
use domains::{DomainError, DomainResult, Page};

use crate::access::AccessGate;

#[derive(Clone)]
pub struct ForumService {
    repo: Arc<dyn ForumRepo>,
    gate: AccessGate,
}

impl ForumService {
    pub fn new(repo: Arc<dyn ForumRepo>, gate: AccessGate) -> Self {
        Self { repo, gate }
    }

    pub async fn categories(&self) -> DomainResult<Vec<ForumCategory>> {
        self.repo.categories().await
    }

    pub async fn category(&self, slug: &str) -> DomainResult<ForumCategory> {
        self.repo.category_by_slug(slug).await
    }

    pub async fn threads(&self, category_id: Uuid, page: u32) -> DomainResult<Page<ForumThread>> {
        self.repo.threads(category_id, page).await
    }

    /// Thread detail load: bumps `view_count` once per call (not idempotent
    /// per viewer), then returns the thread with its posts.
    pub async fn open_thread(&self, id: Uuid) -> DomainResult<(ForumThread, Vec<ForumPost>)> {
        self.repo.record_view(id).await?;
        let thread = self.repo.thread(id).await?;
        let posts = self.repo.posts(id).await?;
        Ok((thread, posts))
    }

    /// Creates a thread and returns the stored row, so the caller can
    /// navigate straight to `/forum/{category}/{id}`.
    pub async fn create_thread(
        &self,
        who: Option<&UserIdentity>,
        category_id: Uuid,
        title: &str,
        content: &str,
    ) -> DomainResult<ForumThread> {
        let who = self.gate.require_identity(who)?;
        self.gate.require_not_banned(who).await?;
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::Validation("title and content are required".into()));
        }
        let thread = self
            .repo
            .create_thread(NewThread {
                category_id,
                author: AuthorRef::from(who),
                title: title.trim().to_string(),
                content: content.trim().to_string(),
            })
            .await?;
        tracing::info!(thread = %thread.id, author = %who.id, "thread created");
        Ok(thread)
    }

    /// Replying increments `reply_count` in the same repository transaction
    /// as the insert. Locked threads refuse replies for everyone, admins
    /// included; unlock first.
    pub async fn reply(
        &self,
        who: Option<&UserIdentity>,
        thread_id: Uuid,
        content: &str,
    ) -> DomainResult<ForumPost> {
        let who = self.gate.require_identity(who)?;
        self.gate.require_not_banned(who).await?;
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }
        let thread = self.repo.thread(thread_id).await?;
        if thread.is_locked {
            return Err(DomainError::Forbidden("thread is locked".into()));
        }
        self.repo
            .create_post(NewPost {
                thread_id,
                author: AuthorRef::from(who),
                content: content.trim().to_string(),
            })
            .await
    }

    /// Authors may edit their own posts; the post is marked `is_edited`.
    pub async fn edit_post(
        &self,
        who: Option<&UserIdentity>,
        post_id: Uuid,
        content: &str,
    ) -> DomainResult<ForumPost> {
        let who = self.gate.require_identity(who)?;
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }
        let post = self.repo.post(post_id).await?;
        if post.author.user_id != who.id {
            return Err(DomainError::Forbidden("only the author may edit a post".into()));
        }
        self.repo.edit_post(post_id, content.trim()).await
    }

    /// Owner-or-admin; decrements the thread's `reply_count` transactionally.
    pub async fn delete_post(&self, who: Option<&UserIdentity>, post_id: Uuid) -> DomainResult<()> {
        let who = self.gate.require_identity(who)?;
        let post = self.repo.post(post_id).await?;
        self.gate.owner_or_admin(who, post.author.user_id)?;
        self.repo.delete_post(post_id).await
    }

    /// Admin only; cascade-removes the thread's posts with it.
    pub async fn delete_thread(&self, who: Option<&UserIdentity>, id: Uuid) -> DomainResult<()> {
        let admin = self.gate.require_admin(who)?;
        self.repo.delete_thread(id).await?;
        tracing::info!(thread = %id, admin = %admin.id, "thread deleted");
        Ok(())
    }

    /// Flips the pinned axis only; `is_locked` is untouched.
    pub async fn set_pinned(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
        pinned: bool,
    ) -> DomainResult<ForumThread> {
        self.gate.require_admin(who)?;
        self.repo.set_pinned(id, pinned).await
    }

    /// Flips the locked axis only; `is_pinned` is untouched.
    pub async fn set_locked(
        &self,
        who: Option<&UserIdentity>,
        id: Uuid,
        locked: bool,
    ) -> DomainResult<ForumThread> {
        self.gate.require_admin(who)?;
        self.repo.set_locked(id, locked).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::models::{Role, UserBan};
    use domains::ports::{MockBanRepo, MockForumRepo};
    use mockall::predicate::eq;

    fn user(role: Role) -> UserIdentity {
        UserIdentity {
            id: Uuid::new_v4(),
            username: "taras".into(),
            email: "taras@example.com".into(),
            role,
        }
    }

    fn thread(id: Uuid, locked: bool, pinned: bool) -> ForumThread {
        ForumThread {
            id,
            category_id: Uuid::new_v4(),
            author: AuthorRef {
                user_id: Uuid::new_v4(),
                username: "author".into(),
                email: "author@example.com".into(),
            },
            title: "t".into(),
            content: "c".into(),
            is_pinned: pinned,
            is_locked: locked,
            view_count: 0,
            reply_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn post(id: Uuid, author_id: Uuid) -> ForumPost {
        ForumPost {
            id,
            thread_id: Uuid::new_v4(),
            author: AuthorRef {
                user_id: author_id,
                username: "author".into(),
                email: "author@example.com".into(),
            },
            content: "hello".into(),
            is_edited: false,
            edited_at: None,
            created_at: Utc::now(),
        }
    }

    fn no_bans() -> AccessGate {
        let mut bans = MockBanRepo::new();
        bans.expect_active_ban().returning(|_| Ok(None));
        AccessGate::new(Arc::new(bans))
    }

    #[tokio::test]
    async fn reply_rejected_on_locked_thread() {
        let tid = Uuid::new_v4();
        let mut repo = MockForumRepo::new();
        repo.expect_thread()
            .with(eq(tid))
            .returning(move |id| Ok(thread(id, true, false)));
        repo.expect_create_post().never();

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let me = user(Role::Member);
        let res = svc.reply(Some(&me), tid, "hi").await;
        assert!(matches!(res, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn reply_rejected_for_banned_user() {
        let me = user(Role::Member);
        let uid = me.id;
        let mut bans = MockBanRepo::new();
        bans.expect_active_ban().returning(move |_| {
            Ok(Some(UserBan {
                id: Uuid::new_v4(),
                user_id: uid,
                reason: "trolling".into(),
                banned_at: Utc::now(),
                unbanned_at: None,
                is_active: true,
            }))
        });
        let mut repo = MockForumRepo::new();
        repo.expect_create_post().never();

        let svc = ForumService::new(Arc::new(repo), AccessGate::new(Arc::new(bans)));
        let res = svc.reply(Some(&me), Uuid::new_v4(), "hi").await;
        assert!(matches!(res, Err(DomainError::Banned { .. })));
    }

    #[tokio::test]
    async fn empty_thread_title_fails_before_any_io() {
        let mut repo = MockForumRepo::new();
        repo.expect_create_thread().never();
        let svc = ForumService::new(Arc::new(repo), no_bans());
        let me = user(Role::Member);
        let res = svc.create_thread(Some(&me), Uuid::new_v4(), "  ", "body").await;
        assert!(matches!(res, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_post_rejected_for_stranger() {
        let pid = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let mut repo = MockForumRepo::new();
        repo.expect_post()
            .with(eq(pid))
            .returning(move |id| Ok(post(id, owner)));
        repo.expect_delete_post().never();

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let stranger = user(Role::Member);
        let res = svc.delete_post(Some(&stranger), pid).await;
        assert!(matches!(res, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_post_allowed_for_admin() {
        let pid = Uuid::new_v4();
        let mut repo = MockForumRepo::new();
        repo.expect_post()
            .returning(move |id| Ok(post(id, Uuid::new_v4())));
        repo.expect_delete_post().with(eq(pid)).returning(|_| Ok(()));

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let moderator = user(Role::Admin);
        assert!(svc.delete_post(Some(&moderator), pid).await.is_ok());
    }

    #[tokio::test]
    async fn pin_then_unpin_leaves_lock_alone() {
        let tid = Uuid::new_v4();
        let mut repo = MockForumRepo::new();
        repo.expect_set_pinned()
            .with(eq(tid), eq(true))
            .returning(|id, pinned| {
                let mut t = thread(id, false, false);
                t.is_pinned = pinned;
                Ok(t)
            });
        repo.expect_set_pinned()
            .with(eq(tid), eq(false))
            .returning(|id, pinned| {
                let mut t = thread(id, false, false);
                t.is_pinned = pinned;
                Ok(t)
            });

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let moderator = user(Role::Admin);

        let pinned = svc.set_pinned(Some(&moderator), tid, true).await.unwrap();
        assert!(pinned.is_pinned);
        assert!(!pinned.is_locked);

        let unpinned = svc.set_pinned(Some(&moderator), tid, false).await.unwrap();
        assert!(!unpinned.is_pinned);
        assert!(!unpinned.is_locked);
    }

    #[tokio::test]
    async fn moderation_requires_admin() {
        let mut repo = MockForumRepo::new();
        repo.expect_set_pinned().never();
        repo.expect_delete_thread().never();

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let me = user(Role::Member);
        assert!(matches!(
            svc.set_pinned(Some(&me), Uuid::new_v4(), true).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.delete_thread(Some(&me), Uuid::new_v4()).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn open_thread_records_a_view_first() {
        let tid = Uuid::new_v4();
        let mut repo = MockForumRepo::new();
        repo.expect_record_view().with(eq(tid)).times(1).returning(|_| Ok(()));
        repo.expect_thread().returning(move |id| Ok(thread(id, false, false)));
        repo.expect_posts().returning(|_| Ok(vec![]));

        let svc = ForumService::new(Arc::new(repo), no_bans());
        let (t, posts) = svc.open_thread(tid).await.unwrap();
        assert_eq!(t.id, tid);
        assert!(posts.is_empty());
    }
}
