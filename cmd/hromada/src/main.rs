//! Server entry point: configuration, migrations, service wiring, and the
//! Axum listener.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api_adapters::metrics::Metrics;
use api_adapters::state::AppState;
use auth_adapters::AuthService;
use configs::AppConfig;
use services::{AccessGate, ChatService, ContentService, ForumService, NewsletterService};
use storage_adapters::mail::RestMailer;
use storage_adapters::postgres::{
    PgArchiveRepo, PgArticleRepo, PgBanRepo, PgChatRepo, PgDailyTopicRepo, PgForumRepo,
    PgPageRepo, PgSubscriberRepo, PgTalentRepo, PgTeamRepo, PgUserRepo, MIGRATOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(config.database.url.expose_secret())
        .await
        .context("connecting to postgres")?;
    MIGRATOR.run(&pool).await.context("running migrations")?;

    let gate = AccessGate::new(Arc::new(PgBanRepo::new(pool.clone())));
    let content = ContentService::new(
        Arc::new(PgArticleRepo::new(pool.clone())),
        Arc::new(PgDailyTopicRepo::new(pool.clone())),
        Arc::new(PgTalentRepo::new(pool.clone())),
        Arc::new(PgArchiveRepo::new(pool.clone())),
        Arc::new(PgTeamRepo::new(pool.clone())),
        Arc::new(PgPageRepo::new(pool.clone())),
        Arc::new(PgSubscriberRepo::new(pool.clone())),
        gate.clone(),
    );
    let forum = ForumService::new(Arc::new(PgForumRepo::new(pool.clone())), gate.clone());
    let chat = ChatService::new(Arc::new(PgChatRepo::new(pool.clone())), gate.clone());
    let mailer = RestMailer::new(
        config.mail.endpoint.clone(),
        config.mail.from.clone(),
        config.mail.api_key.clone(),
    );
    let newsletter = NewsletterService::new(
        Arc::new(PgSubscriberRepo::new(pool.clone())),
        Arc::new(mailer),
        config.mail.admin_email.clone(),
    );
    let auth = AuthService::new(
        Arc::new(PgUserRepo::new(pool)),
        config.auth.jwt_secret.clone(),
    );

    let state = AppState {
        content,
        forum,
        chat,
        newsletter,
        gate,
        auth,
        metrics: Metrics::new(),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "hromada listening");

    axum::serve(listener, api_adapters::build_router(state))
        .await
        .context("server error")?;
    Ok(())
}
