use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{Article, ArticlePatch, NewArticle};
use domains::page::{offset, Page, PAGE_SIZE};
use domains::ports::{ArticleRepo, RELATED_LIMIT};
use domains::{DomainError, DomainResult};

use super::{bilingual, db_err};

#[derive(Clone)]
pub struct PgArticleRepo {
    pool: PgPool,
}

impl PgArticleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_article(row: &PgRow) -> Article {
    Article {
        id: row.get("id"),
        title: bilingual(row, "title"),
        excerpt: bilingual(row, "excerpt"),
        content: bilingual(row, "content"),
        pdf_url_uk: row.get("pdf_url_uk"),
        pdf_url_en: row.get("pdf_url_en"),
        category: bilingual(row, "category"),
        author_name: bilingual(row, "author_name"),
        author_bio: bilingual(row, "author_bio"),
        author_photo_url: row.get("author_photo_url"),
        main_image_url: row.get("main_image_url"),
        read_time_minutes: row.get("read_time_minutes"),
        is_featured: row.get("is_featured"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl ArticleRepo for PgArticleRepo {
    async fn get(&self, id: Uuid) -> DomainResult<Article> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_article(&r))
            .ok_or_else(|| DomainError::not_found("article", id))
    }

    async fn list(&self, page: u32) -> DomainResult<Page<Article>> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?
            .get("cnt");

        let rows = sqlx::query(
            "SELECT * FROM articles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE as i64)
        .bind(offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let items = rows.iter().map(map_article).collect();
        Ok(Page::new(items, page, total as u64))
    }

    async fn featured(&self, limit: i64) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE is_featured ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(map_article).collect())
    }

    async fn related(&self, category_uk: &str, exclude_id: Uuid) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles \
             WHERE category_uk = $1 AND id <> $2 \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(category_uk)
        .bind(exclude_id)
        .bind(RELATED_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(map_article).collect())
    }

    async fn create(&self, new: NewArticle) -> DomainResult<Article> {
        let row = sqlx::query(
            "INSERT INTO articles (\
                 title_uk, title_en, excerpt_uk, excerpt_en, content_uk, content_en, \
                 pdf_url_uk, pdf_url_en, category_uk, category_en, \
                 author_name_uk, author_name_en, author_bio_uk, author_bio_en, \
                 author_photo_url, main_image_url, read_time_minutes, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING *",
        )
        .bind(&new.title.uk)
        .bind(&new.title.en)
        .bind(&new.excerpt.uk)
        .bind(&new.excerpt.en)
        .bind(&new.content.uk)
        .bind(&new.content.en)
        .bind(&new.pdf_url_uk)
        .bind(&new.pdf_url_en)
        .bind(&new.category.uk)
        .bind(&new.category.en)
        .bind(&new.author_name.uk)
        .bind(&new.author_name.en)
        .bind(&new.author_bio.uk)
        .bind(&new.author_bio.en)
        .bind(&new.author_photo_url)
        .bind(&new.main_image_url)
        .bind(new.read_time_minutes)
        .bind(new.is_featured)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_article(&row))
    }

    /// Partial patch: NULL binds leave the stored value in place.
    async fn update(&self, id: Uuid, patch: ArticlePatch) -> DomainResult<Article> {
        let row = sqlx::query(
            "UPDATE articles SET \
                 title_uk          = COALESCE($2, title_uk), \
                 title_en          = COALESCE($3, title_en), \
                 excerpt_uk        = COALESCE($4, excerpt_uk), \
                 excerpt_en        = COALESCE($5, excerpt_en), \
                 content_uk        = COALESCE($6, content_uk), \
                 content_en        = COALESCE($7, content_en), \
                 category_uk       = COALESCE($8, category_uk), \
                 category_en       = COALESCE($9, category_en), \
                 main_image_url    = COALESCE($10, main_image_url), \
                 read_time_minutes = COALESCE($11, read_time_minutes), \
                 is_featured       = COALESCE($12, is_featured), \
                 updated_at        = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(patch.title.as_ref().map(|b| b.uk.clone()))
        .bind(patch.title.as_ref().map(|b| b.en.clone()))
        .bind(patch.excerpt.as_ref().map(|b| b.uk.clone()))
        .bind(patch.excerpt.as_ref().map(|b| b.en.clone()))
        .bind(patch.content.as_ref().map(|b| b.uk.clone()))
        .bind(patch.content.as_ref().map(|b| b.en.clone()))
        .bind(patch.category.as_ref().map(|b| b.uk.clone()))
        .bind(patch.category.as_ref().map(|b| b.en.clone()))
        .bind(patch.main_image_url)
        .bind(patch.read_time_minutes)
        .bind(patch.is_featured)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_article(&r))
            .ok_or_else(|| DomainError::not_found("article", id))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("article", id));
        }
        Ok(())
    }
}
