//! Account registration, login and session verification against the
//! `UserRepo` port.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use domains::models::{Role, UserIdentity};
use domains::ports::UserRepo;
use domains::{DomainError, DomainResult};

use crate::{jwt, password};

const SESSION_TTL_HOURS: i64 = 24 * 7;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: UserIdentity,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    secret: SecretString,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>, secret: SecretString) -> Self {
        Self { users, secret }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plain_password: &str,
    ) -> DomainResult<Session> {
        let username = username.trim();
        let email = email.trim().to_ascii_lowercase();
        if username.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("username and email are required".into()));
        }
        if plain_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let hash = password::hash_password(plain_password)?;
        let user = self.users.create(username, &email, &hash, Role::Member).await?;
        tracing::info!(user = %user.id, "account registered");
        self.issue(user)
    }

    /// One failure message for both unknown account and wrong password.
    pub async fn login(&self, email: &str, plain_password: &str) -> DomainResult<Session> {
        let record = self
            .users
            .by_email(email.trim().to_ascii_lowercase().as_str())
            .await?
            .ok_or_else(|| DomainError::Unauthorized("invalid email or password".into()))?;
        if !password::verify_password(plain_password, &record.password_hash) {
            return Err(DomainError::Unauthorized("invalid email or password".into()));
        }
        self.issue(record.identity)
    }

    pub fn authenticate(&self, token: &str) -> DomainResult<UserIdentity> {
        jwt::verify(token, self.secret.expose_secret().as_bytes())
    }

    fn issue(&self, user: UserIdentity) -> DomainResult<Session> {
        let token = jwt::issue(
            &user,
            self.secret.expose_secret().as_bytes(),
            Duration::hours(SESSION_TTL_HOURS),
        )?;
        Ok(Session { token, user })
    }
}
