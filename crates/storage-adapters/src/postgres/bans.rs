use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::UserBan;
use domains::ports::BanRepo;
use domains::DomainResult;

use super::db_err;

#[derive(Clone)]
pub struct PgBanRepo {
    pool: PgPool,
}

impl PgBanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_ban(row: &PgRow) -> UserBan {
    UserBan {
        id: row.get("id"),
        user_id: row.get("user_id"),
        reason: row.get("reason"),
        banned_at: row.get("banned_at"),
        unbanned_at: row.get("unbanned_at"),
        is_active: row.get("is_active"),
    }
}

#[async_trait]
impl BanRepo for PgBanRepo {
    async fn active_ban(&self, user_id: Uuid) -> DomainResult<Option<UserBan>> {
        let row = sqlx::query("SELECT * FROM user_bans WHERE user_id = $1 AND is_active")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(|r| map_ban(&r)))
    }

    /// History stays; only one record may be active. The deactivation and
    /// the new insert commit together, so two "active" rows cannot coexist
    /// (a partial unique index backs this up at the schema level).
    async fn ban(&self, user_id: Uuid, reason: &str) -> DomainResult<UserBan> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        sqlx::query(
            "UPDATE user_bans SET is_active = FALSE, unbanned_at = now() \
             WHERE user_id = $1 AND is_active",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        let row = sqlx::query(
            "INSERT INTO user_bans (user_id, reason) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(map_ban(&row))
    }

    async fn unban(&self, user_id: Uuid) -> DomainResult<()> {
        sqlx::query(
            "UPDATE user_bans SET is_active = FALSE, unbanned_at = now() \
             WHERE user_id = $1 AND is_active",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn history(&self, user_id: Uuid) -> DomainResult<Vec<UserBan>> {
        let rows = sqlx::query(
            "SELECT * FROM user_bans WHERE user_id = $1 ORDER BY banned_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(map_ban).collect())
    }
}
