use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use auth_adapters::Session;
use domains::models::UserIdentity;
use domains::DomainError;

use crate::error::{ApiError, ApiResult};
use crate::extract::MaybeUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserIdentity,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session = state
        .auth
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}

/// Who am I. Requires a valid token; anonymous callers get 401.
pub async fn me(MaybeUser(user): MaybeUser) -> ApiResult<Json<UserIdentity>> {
    let user = user.ok_or_else(|| {
        ApiError(DomainError::Unauthorized("authentication required".into()))
    })?;
    Ok(Json(user))
}
