use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{ArchiveCategory, ArchiveDocument, NewArchiveDocument};
use domains::page::{offset, Page, PAGE_SIZE};
use domains::ports::ArchiveRepo;
use domains::{DomainError, DomainResult};

use super::{bilingual, db_err};

#[derive(Clone)]
pub struct PgArchiveRepo {
    pool: PgPool,
}

impl PgArchiveRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_category(row: &PgRow) -> ArchiveCategory {
    ArchiveCategory {
        id: row.get("id"),
        name: bilingual(row, "name"),
        slug: row.get("slug"),
        display_order: row.get("display_order"),
    }
}

fn map_document(row: &PgRow) -> ArchiveDocument {
    ArchiveDocument {
        id: row.get("id"),
        category_id: row.get("category_id"),
        title: bilingual(row, "title"),
        description: bilingual(row, "description"),
        file_url: row.get("file_url"),
        published_on: row.get("published_on"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ArchiveRepo for PgArchiveRepo {
    async fn categories(&self) -> DomainResult<Vec<ArchiveCategory>> {
        let rows = sqlx::query("SELECT * FROM archive_categories ORDER BY display_order, slug")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(map_category).collect())
    }

    async fn documents(
        &self,
        category_id: Option<Uuid>,
        page: u32,
    ) -> DomainResult<Page<ArchiveDocument>> {
        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM archive_documents \
             WHERE ($1::uuid IS NULL OR category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?
        .get("cnt");

        let rows = sqlx::query(
            "SELECT * FROM archive_documents WHERE ($1::uuid IS NULL OR category_id = $1) \
             ORDER BY published_on DESC NULLS LAST, created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category_id)
        .bind(PAGE_SIZE as i64)
        .bind(offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Page::new(rows.iter().map(map_document).collect(), page, total as u64))
    }

    async fn get(&self, id: Uuid) -> DomainResult<ArchiveDocument> {
        let row = sqlx::query("SELECT * FROM archive_documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_document(&r))
            .ok_or_else(|| DomainError::not_found("archive document", id))
    }

    async fn create(&self, new: NewArchiveDocument) -> DomainResult<ArchiveDocument> {
        let row = sqlx::query(
            "INSERT INTO archive_documents \
                 (category_id, title_uk, title_en, description_uk, description_en, file_url, published_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(new.category_id)
        .bind(&new.title.uk)
        .bind(&new.title.en)
        .bind(&new.description.uk)
        .bind(&new.description.en)
        .bind(&new.file_url)
        .bind(new.published_on)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_document(&row))
    }

    async fn update(&self, id: Uuid, new: NewArchiveDocument) -> DomainResult<ArchiveDocument> {
        let row = sqlx::query(
            "UPDATE archive_documents SET category_id = $2, title_uk = $3, title_en = $4, \
                 description_uk = $5, description_en = $6, file_url = $7, published_on = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new.category_id)
        .bind(&new.title.uk)
        .bind(&new.title.en)
        .bind(&new.description.uk)
        .bind(&new.description.en)
        .bind(&new.file_url)
        .bind(new.published_on)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_document(&r))
            .ok_or_else(|| DomainError::not_found("archive document", id))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM archive_documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("archive document", id));
        }
        Ok(())
    }
}
