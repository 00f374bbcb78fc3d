use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{Role, UserIdentity, UserRecord};
use domains::ports::UserRepo;
use domains::{DomainError, DomainResult};

use super::db_err;

#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_identity(row: &PgRow) -> DomainResult<UserIdentity> {
    let role: String = row.get("role");
    Ok(UserIdentity {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        role: role.parse()?,
    })
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> DomainResult<UserIdentity> {
        let row = sqlx::query(
            "INSERT INTO users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        map_identity(&row)
    }

    async fn by_email(&self, email: &str) -> DomainResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => Ok(Some(UserRecord {
                identity: map_identity(&row)?,
                password_hash: row.get("password_hash"),
                created_at: row.get("created_at"),
            })),
            None => Ok(None),
        }
    }

    async fn by_id(&self, id: Uuid) -> DomainResult<UserIdentity> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => map_identity(&row),
            None => Err(DomainError::not_found("user", id)),
        }
    }
}
