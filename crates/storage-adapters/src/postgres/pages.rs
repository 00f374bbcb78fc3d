use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use domains::models::StaticPage;
use domains::ports::PageRepo;
use domains::{DomainError, DomainResult};

use super::db_err;

#[derive(Clone)]
pub struct PgPageRepo {
    pool: PgPool,
}

impl PgPageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_page(row: &PgRow) -> StaticPage {
    StaticPage {
        id: row.get("id"),
        slug: row.get("slug"),
        content_uk: row.get("content_uk"),
        content_en: row.get("content_en"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl PageRepo for PgPageRepo {
    async fn by_slug(&self, slug: &str) -> DomainResult<StaticPage> {
        let row = sqlx::query("SELECT * FROM pages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_page(&r))
            .ok_or_else(|| DomainError::not_found("page", slug))
    }

    async fn upsert(
        &self,
        slug: &str,
        content_uk: serde_json::Value,
        content_en: serde_json::Value,
    ) -> DomainResult<StaticPage> {
        let row = sqlx::query(
            "INSERT INTO pages (slug, content_uk, content_en) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET \
                 content_uk = EXCLUDED.content_uk, \
                 content_en = EXCLUDED.content_en, \
                 updated_at = now() \
             RETURNING *",
        )
        .bind(slug)
        .bind(content_uk)
        .bind(content_en)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_page(&row))
    }
}
