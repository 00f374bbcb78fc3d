//! # Postgres repositories
//!
//! Mapping between the relational schema and the `domains` models. Queries
//! are plain parameterized statements; bilingual pairs live in flattened
//! `*_uk` / `*_en` columns and are folded back into [`Bilingual`] values
//! when rows are read.

use domains::models::AuthorRef;
use domains::{Bilingual, DomainError};
use sqlx::postgres::PgRow;
use sqlx::Row;

mod archive;
mod articles;
mod bans;
mod chat;
mod forum;
mod pages;
mod subscribers;
mod talents;
mod team;
mod topics;
mod users;

pub use archive::PgArchiveRepo;
pub use articles::PgArticleRepo;
pub use bans::PgBanRepo;
pub use chat::PgChatRepo;
pub use forum::PgForumRepo;
pub use pages::PgPageRepo;
pub use subscribers::PgSubscriberRepo;
pub use talents::PgTalentRepo;
pub use team::PgTeamRepo;
pub use topics::PgDailyTopicRepo;
pub use users::PgUserRepo;

/// Embedded migrations, run by the binary at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Translates database failures into the domain taxonomy. Unique-constraint
/// hits become `Conflict`; everything else is `Internal` with the backend's
/// message passed through verbatim.
pub(crate) fn db_err(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            DomainError::Conflict(db.to_string())
        }
        _ => DomainError::Internal(err.to_string()),
    }
}

/// Folds a `<base>_uk` / `<base>_en` column pair into one value.
pub(crate) fn bilingual(row: &PgRow, base: &str) -> Bilingual {
    Bilingual {
        uk: row.get(format!("{base}_uk").as_str()),
        en: row.get(format!("{base}_en").as_str()),
    }
}

/// Reads the author snapshot columns shared by threads, posts and chat rows.
pub(crate) fn author_ref(row: &PgRow) -> AuthorRef {
    AuthorRef {
        user_id: row.get("author_id"),
        username: row.get("author_username"),
        email: row.get("author_email"),
    }
}
