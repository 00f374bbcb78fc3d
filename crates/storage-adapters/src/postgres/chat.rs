use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{AuthorRef, ChatMessage};
use domains::ports::ChatRepo;
use domains::{DomainError, DomainResult};

use super::{author_ref, db_err};

#[derive(Clone)]
pub struct PgChatRepo {
    pool: PgPool,
}

impl PgChatRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_message(row: &PgRow) -> ChatMessage {
    ChatMessage {
        id: row.get("id"),
        author: author_ref(row),
        body: row.get("body"),
        is_deleted: row.get("is_deleted"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ChatRepo for PgChatRepo {
    /// Newest `limit` visible messages, flipped to oldest-first for display.
    async fn recent(&self, limit: i64) -> DomainResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE NOT is_deleted \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let mut messages: Vec<ChatMessage> = rows.iter().map(map_message).collect();
        messages.reverse();
        Ok(messages)
    }

    async fn get(&self, id: Uuid) -> DomainResult<ChatMessage> {
        let row = sqlx::query("SELECT * FROM chat_messages WHERE id = $1 AND NOT is_deleted")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_message(&r))
            .ok_or_else(|| DomainError::not_found("chat message", id))
    }

    async fn insert(&self, author: AuthorRef, body: &str) -> DomainResult<ChatMessage> {
        let row = sqlx::query(
            "INSERT INTO chat_messages (author_id, author_username, author_email, body) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(author.user_id)
        .bind(&author.username)
        .bind(&author.email)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_message(&row))
    }

    /// Soft delete only; the row stays for the audit trail and reads filter
    /// on `is_deleted`.
    async fn soft_delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE chat_messages SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("chat message", id));
        }
        Ok(())
    }
}
