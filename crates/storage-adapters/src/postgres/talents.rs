use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{NewTalent, Talent, TalentCategory};
use domains::page::{offset, Page, PAGE_SIZE};
use domains::ports::TalentRepo;
use domains::{DomainError, DomainResult};

use super::{bilingual, db_err};

#[derive(Clone)]
pub struct PgTalentRepo {
    pool: PgPool,
}

impl PgTalentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_category(row: &PgRow) -> TalentCategory {
    TalentCategory {
        id: row.get("id"),
        name: bilingual(row, "name"),
        slug: row.get("slug"),
        display_order: row.get("display_order"),
    }
}

fn map_talent(row: &PgRow) -> Talent {
    Talent {
        id: row.get("id"),
        category_id: row.get("category_id"),
        name: bilingual(row, "name"),
        description: bilingual(row, "description"),
        photo_url: row.get("photo_url"),
        contact: row.get("contact"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TalentRepo for PgTalentRepo {
    async fn categories(&self) -> DomainResult<Vec<TalentCategory>> {
        let rows = sqlx::query("SELECT * FROM talent_categories ORDER BY display_order, slug")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(map_category).collect())
    }

    /// Optional category filter expressed as a NULL-tolerant equality, so
    /// one statement serves both the filtered and unfiltered list.
    async fn list(&self, category_id: Option<Uuid>, page: u32) -> DomainResult<Page<Talent>> {
        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM talents WHERE ($1::uuid IS NULL OR category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?
        .get("cnt");

        let rows = sqlx::query(
            "SELECT * FROM talents WHERE ($1::uuid IS NULL OR category_id = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category_id)
        .bind(PAGE_SIZE as i64)
        .bind(offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Page::new(rows.iter().map(map_talent).collect(), page, total as u64))
    }

    async fn get(&self, id: Uuid) -> DomainResult<Talent> {
        let row = sqlx::query("SELECT * FROM talents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_talent(&r))
            .ok_or_else(|| DomainError::not_found("talent", id))
    }

    async fn create(&self, new: NewTalent) -> DomainResult<Talent> {
        let row = sqlx::query(
            "INSERT INTO talents \
                 (category_id, name_uk, name_en, description_uk, description_en, photo_url, contact) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(new.category_id)
        .bind(&new.name.uk)
        .bind(&new.name.en)
        .bind(&new.description.uk)
        .bind(&new.description.en)
        .bind(&new.photo_url)
        .bind(&new.contact)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_talent(&row))
    }

    async fn update(&self, id: Uuid, new: NewTalent) -> DomainResult<Talent> {
        let row = sqlx::query(
            "UPDATE talents SET category_id = $2, name_uk = $3, name_en = $4, \
                 description_uk = $5, description_en = $6, photo_url = $7, contact = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new.category_id)
        .bind(&new.name.uk)
        .bind(&new.name.en)
        .bind(&new.description.uk)
        .bind(&new.description.en)
        .bind(&new.photo_url)
        .bind(&new.contact)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_talent(&r))
            .ok_or_else(|| DomainError::not_found("talent", id))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM talents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("talent", id));
        }
        Ok(())
    }
}
