use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use domains::models::{NewTeamMember, TeamMember};
use domains::ports::TeamRepo;
use domains::{DomainError, DomainResult};

use super::{bilingual, db_err};

#[derive(Clone)]
pub struct PgTeamRepo {
    pool: PgPool,
}

impl PgTeamRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_member(row: &PgRow) -> TeamMember {
    TeamMember {
        id: row.get("id"),
        name: bilingual(row, "name"),
        role: bilingual(row, "role"),
        bio: bilingual(row, "bio"),
        photo_url: row.get("photo_url"),
        display_order: row.get("display_order"),
    }
}

#[async_trait]
impl TeamRepo for PgTeamRepo {
    async fn list(&self) -> DomainResult<Vec<TeamMember>> {
        let rows = sqlx::query("SELECT * FROM team_members ORDER BY display_order, name_uk")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(map_member).collect())
    }

    async fn create(&self, new: NewTeamMember) -> DomainResult<TeamMember> {
        let row = sqlx::query(
            "INSERT INTO team_members \
                 (name_uk, name_en, role_uk, role_en, bio_uk, bio_en, photo_url, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&new.name.uk)
        .bind(&new.name.en)
        .bind(&new.role.uk)
        .bind(&new.role.en)
        .bind(&new.bio.uk)
        .bind(&new.bio.en)
        .bind(&new.photo_url)
        .bind(new.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_member(&row))
    }

    async fn update(&self, id: Uuid, new: NewTeamMember) -> DomainResult<TeamMember> {
        let row = sqlx::query(
            "UPDATE team_members SET name_uk = $2, name_en = $3, role_uk = $4, role_en = $5, \
                 bio_uk = $6, bio_en = $7, photo_url = $8, display_order = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&new.name.uk)
        .bind(&new.name.en)
        .bind(&new.role.uk)
        .bind(&new.role.en)
        .bind(&new.bio.uk)
        .bind(&new.bio.en)
        .bind(&new.photo_url)
        .bind(new.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| map_member(&r))
            .ok_or_else(|| DomainError::not_found("team member", id))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("team member", id));
        }
        Ok(())
    }
}
