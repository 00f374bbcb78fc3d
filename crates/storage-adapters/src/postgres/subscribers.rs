use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use domains::models::NewsletterSubscriber;
use domains::ports::SubscriberRepo;
use domains::{DomainError, DomainResult};

use super::db_err;

#[derive(Clone)]
pub struct PgSubscriberRepo {
    pool: PgPool,
}

impl PgSubscriberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_subscriber(row: &PgRow) -> NewsletterSubscriber {
    NewsletterSubscriber {
        id: row.get("id"),
        email: row.get("email"),
        is_active: row.get("is_active"),
        subscribed_at: row.get("subscribed_at"),
    }
}

#[async_trait]
impl SubscriberRepo for PgSubscriberRepo {
    async fn active(&self) -> DomainResult<Vec<NewsletterSubscriber>> {
        let rows = sqlx::query(
            "SELECT * FROM newsletter_subscribers WHERE is_active ORDER BY subscribed_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(map_subscriber).collect())
    }

    /// Re-subscribing a previously unsubscribed address reactivates it.
    async fn subscribe(&self, email: &str) -> DomainResult<NewsletterSubscriber> {
        let row = sqlx::query(
            "INSERT INTO newsletter_subscribers (email) VALUES ($1) \
             ON CONFLICT (email) DO UPDATE SET is_active = TRUE \
             RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_subscriber(&row))
    }

    async fn unsubscribe(&self, email: &str) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE newsletter_subscribers SET is_active = FALSE WHERE email = $1",
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("subscriber", email));
        }
        Ok(())
    }
}
