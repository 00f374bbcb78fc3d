//! Forum persistence. Counter maintenance is transactional: the post insert
//! or delete and the `reply_count` adjustment commit together or not at all,
//! so a partial failure cannot leave the counter drifted.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{ForumCategory, ForumPost, ForumThread, NewPost, NewThread};
use domains::page::{offset, Page, PAGE_SIZE};
use domains::ports::ForumRepo;
use domains::{DomainError, DomainResult};

use super::{author_ref, bilingual, db_err};

#[derive(Clone)]
pub struct PgForumRepo {
    pool: PgPool,
}

impl PgForumRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_category(row: &PgRow) -> ForumCategory {
    ForumCategory {
        id: row.get("id"),
        name: bilingual(row, "name"),
        description: bilingual(row, "description"),
        slug: row.get("slug"),
        display_order: row.get("display_order"),
    }
}

fn map_thread(row: &PgRow) -> ForumThread {
    ForumThread {
        id: row.get("id"),
        category_id: row.get("category_id"),
        author: author_ref(row),
        title: row.get("title"),
        content: row.get("content"),
        is_pinned: row.get("is_pinned"),
        is_locked: row.get("is_locked"),
        view_count: row.get("view_count"),
        reply_count: row.get("reply_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_post(row: &PgRow) -> ForumPost {
    ForumPost {
        id: row.get("id"),
        thread_id: row.get("thread_id"),
        author: author_ref(row),
        content: row.get("content"),
        is_edited: row.get("is_edited"),
        edited_at: row.get("edited_at"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ForumRepo for PgForumRepo {
    async fn categories(&self) -> DomainResult<Vec<ForumCategory>> {
        let rows = sqlx::query("SELECT * FROM forum_categories ORDER BY display_order, slug")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(map_category).collect())
    }

    async fn category_by_slug(&self, slug: &str) -> DomainResult<ForumCategory> {
        let row = sqlx::query("SELECT * FROM forum_categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_category(&r))
            .ok_or_else(|| DomainError::not_found("forum category", slug))
    }

    /// Pinned threads float above the rest; within each group, most recent
    /// activity first.
    async fn threads(&self, category_id: Uuid, page: u32) -> DomainResult<Page<ForumThread>> {
        let total: i64 =
            sqlx::query("SELECT COUNT(*) AS cnt FROM forum_threads WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?
                .get("cnt");

        let rows = sqlx::query(
            "SELECT * FROM forum_threads WHERE category_id = $1 \
             ORDER BY is_pinned DESC, updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category_id)
        .bind(PAGE_SIZE as i64)
        .bind(offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Page::new(rows.iter().map(map_thread).collect(), page, total as u64))
    }

    async fn thread(&self, id: Uuid) -> DomainResult<ForumThread> {
        let row = sqlx::query("SELECT * FROM forum_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_thread(&r))
            .ok_or_else(|| DomainError::not_found("thread", id))
    }

    async fn create_thread(&self, new: NewThread) -> DomainResult<ForumThread> {
        let row = sqlx::query(
            "INSERT INTO forum_threads \
                 (category_id, author_id, author_username, author_email, title, content) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(new.category_id)
        .bind(new.author.user_id)
        .bind(&new.author.username)
        .bind(&new.author.email)
        .bind(&new.title)
        .bind(&new.content)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_thread(&row))
    }

    /// Cascade delete. The FK already cascades; the explicit post delete
    /// keeps the invariant even against a schema missing the constraint.
    async fn delete_thread(&self, id: Uuid) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        sqlx::query("DELETE FROM forum_posts WHERE thread_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        let result = sqlx::query("DELETE FROM forum_threads WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("thread", id));
        }
        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> DomainResult<ForumThread> {
        let row = sqlx::query(
            "UPDATE forum_threads SET is_pinned = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(pinned)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_thread(&r))
            .ok_or_else(|| DomainError::not_found("thread", id))
    }

    async fn set_locked(&self, id: Uuid, locked: bool) -> DomainResult<ForumThread> {
        let row = sqlx::query(
            "UPDATE forum_threads SET is_locked = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(locked)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_thread(&r))
            .ok_or_else(|| DomainError::not_found("thread", id))
    }

    async fn record_view(&self, id: Uuid) -> DomainResult<()> {
        sqlx::query("UPDATE forum_threads SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn posts(&self, thread_id: Uuid) -> DomainResult<Vec<ForumPost>> {
        let rows = sqlx::query(
            "SELECT * FROM forum_posts WHERE thread_id = $1 ORDER BY created_at ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(map_post).collect())
    }

    async fn post(&self, id: Uuid) -> DomainResult<ForumPost> {
        let row = sqlx::query("SELECT * FROM forum_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_post(&r))
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    async fn create_post(&self, new: NewPost) -> DomainResult<ForumPost> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let row = sqlx::query(
            "INSERT INTO forum_posts (thread_id, author_id, author_username, author_email, content) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.thread_id)
        .bind(new.author.user_id)
        .bind(&new.author.username)
        .bind(&new.author.email)
        .bind(&new.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;
        sqlx::query(
            "UPDATE forum_threads SET reply_count = reply_count + 1, updated_at = now() \
             WHERE id = $1",
        )
        .bind(new.thread_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(map_post(&row))
    }

    async fn delete_post(&self, id: Uuid) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let row = sqlx::query("DELETE FROM forum_posts WHERE id = $1 RETURNING thread_id")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        let thread_id: Uuid = match row {
            Some(row) => row.get("thread_id"),
            None => return Err(DomainError::not_found("post", id)),
        };
        sqlx::query(
            "UPDATE forum_threads SET reply_count = GREATEST(reply_count - 1, 0) WHERE id = $1",
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn edit_post(&self, id: Uuid, content: &str) -> DomainResult<ForumPost> {
        let row = sqlx::query(
            "UPDATE forum_posts SET content = $2, is_edited = TRUE, edited_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_post(&r))
            .ok_or_else(|| DomainError::not_found("post", id))
    }
}
