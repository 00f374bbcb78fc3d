use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{DailyTopic, NewDailyTopic};
use domains::page::{offset, Page, PAGE_SIZE};
use domains::ports::DailyTopicRepo;
use domains::{DomainError, DomainResult};

use super::{bilingual, db_err};

#[derive(Clone)]
pub struct PgDailyTopicRepo {
    pool: PgPool,
}

impl PgDailyTopicRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_topic(row: &PgRow) -> DailyTopic {
    DailyTopic {
        id: row.get("id"),
        date: row.get("date"),
        title: bilingual(row, "title"),
        content: bilingual(row, "content"),
        image_url: row.get("image_url"),
        read_time_minutes: row.get("read_time_minutes"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl DailyTopicRepo for PgDailyTopicRepo {
    async fn current(&self, today: NaiveDate) -> DomainResult<Option<DailyTopic>> {
        let row = sqlx::query(
            "SELECT * FROM daily_topics WHERE date <= $1 ORDER BY date DESC LIMIT 1",
        )
        .bind(today)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(|r| map_topic(&r)))
    }

    async fn by_date(&self, date: NaiveDate) -> DomainResult<DailyTopic> {
        let row = sqlx::query("SELECT * FROM daily_topics WHERE date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| map_topic(&r))
            .ok_or_else(|| DomainError::not_found("daily topic", date))
    }

    async fn list(&self, page: u32) -> DomainResult<Page<DailyTopic>> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM daily_topics")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?
            .get("cnt");

        let rows = sqlx::query("SELECT * FROM daily_topics ORDER BY date DESC LIMIT $1 OFFSET $2")
            .bind(PAGE_SIZE as i64)
            .bind(offset(page))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(Page::new(rows.iter().map(map_topic).collect(), page, total as u64))
    }

    /// Upsert on the unique date key: one topic per day, a second save for
    /// the same date overwrites the first.
    async fn upsert(&self, new: NewDailyTopic) -> DomainResult<DailyTopic> {
        let row = sqlx::query(
            "INSERT INTO daily_topics \
                 (date, title_uk, title_en, content_uk, content_en, image_url, read_time_minutes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (date) DO UPDATE SET \
                 title_uk = EXCLUDED.title_uk, \
                 title_en = EXCLUDED.title_en, \
                 content_uk = EXCLUDED.content_uk, \
                 content_en = EXCLUDED.content_en, \
                 image_url = EXCLUDED.image_url, \
                 read_time_minutes = EXCLUDED.read_time_minutes \
             RETURNING *",
        )
        .bind(new.date)
        .bind(&new.title.uk)
        .bind(&new.title.en)
        .bind(&new.content.uk)
        .bind(&new.content.en)
        .bind(&new.image_url)
        .bind(new.read_time_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_topic(&row))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM daily_topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("daily topic", id));
        }
        Ok(())
    }
}
