//! # configs
//!
//! Layered configuration: an optional `hromada.toml` file overridden by
//! `HROMADA_*` environment variables (with `__` as the section separator),
//! plus `.env` loading for local development. Secrets are wrapped in
//! `secrecy` so they never land in debug output.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(feature = "db-postgres")]
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub max_connections: u32,
}

#[cfg(feature = "auth-jwt")]
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
}

#[cfg(feature = "mail-rest")]
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub from: String,
    /// Fixed administrator inbox for contact-form notifications.
    pub admin_email: String,
    /// Absent key leaves the mailer in "not configured" state; mail
    /// endpoints then answer with a distinct error instead of failing
    /// generically.
    pub api_key: Option<SecretString>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[cfg(feature = "db-postgres")]
    pub database: DatabaseConfig,
    #[cfg(feature = "auth-jwt")]
    pub auth: AuthConfig,
    #[cfg(feature = "mail-rest")]
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Local development convenience; a missing .env is fine.
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("mail.endpoint", "https://api.resend.com/emails")?
            .set_default("mail.from", "Hromada <news@hromada.org>")?
            .set_default("mail.admin_email", "admin@hromada.org")?
            .add_source(File::with_name("hromada").required(false))
            .add_source(Environment::with_prefix("HROMADA").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(host = %loaded.server.host, port = loaded.server.port, "configuration loaded");
        Ok(loaded)
    }
}
