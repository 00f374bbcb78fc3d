//! One-shot seeding: schema migrations, the administrator account, and the
//! initial forum categories. Safe to re-run; everything is upserted.

use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use auth_adapters::password;
use configs::AppConfig;
use storage_adapters::postgres::MIGRATOR;

const CATEGORIES: &[(&str, &str, &str, i32)] = &[
    ("Загальне", "General", "general", 0),
    ("Новини громади", "Community news", "news", 1),
    ("Допомога", "Help", "help", 2),
    ("Оголошення", "Announcements", "announcements", 3),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(config.database.url.expose_secret())
        .await
        .context("connecting to postgres")?;
    MIGRATOR.run(&pool).await.context("running migrations")?;

    let admin_email = std::env::var("SEED_ADMIN_EMAIL")
        .context("SEED_ADMIN_EMAIL is required")?
        .to_ascii_lowercase();
    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD is required")?;
    let hash = password::hash_password(&admin_password)
        .map_err(|err| anyhow::anyhow!("hashing admin password: {err}"))?;

    sqlx::query(
        "INSERT INTO users (username, email, password_hash, role)
         VALUES ('admin', $1, $2, 'admin')
         ON CONFLICT (email) DO UPDATE SET password_hash = $2, role = 'admin'",
    )
    .bind(&admin_email)
    .bind(&hash)
    .execute(&pool)
    .await
    .context("seeding admin account")?;
    tracing::info!(email = %admin_email, "admin account ready");

    for (name_uk, name_en, slug, order) in CATEGORIES {
        sqlx::query(
            "INSERT INTO forum_categories (name_uk, name_en, slug, display_order)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name_uk)
        .bind(name_en)
        .bind(slug)
        .bind(order)
        .execute(&pool)
        .await
        .with_context(|| format!("seeding category {slug}"))?;
    }
    tracing::info!(count = CATEGORIES.len(), "forum categories ready");

    Ok(())
}
