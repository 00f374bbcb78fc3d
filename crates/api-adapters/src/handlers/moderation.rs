//! Admin ban management. The gating itself lives in `AccessGate`; these
//! handlers only shuttle the request through.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::UserBan;
use domains::DomainError;
use services::access::banned_notice_text;

use crate::error::{ApiError, ApiResult};
use crate::extract::MaybeUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct BanStatus {
    pub banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban: Option<UserBan>,
}

/// The caller's own ban state, for rendering the banned notice.
pub async fn my_ban(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Json<BanStatus>> {
    let user = user.ok_or_else(|| {
        ApiError(DomainError::Unauthorized("authentication required".into()))
    })?;
    let ban = state.gate.ban_notice(user.id).await?;
    let status = match ban {
        Some(ban) => BanStatus {
            banned: true,
            notice: Some(banned_notice_text(&ban.reason, ban.banned_at)),
            ban: Some(ban),
        },
        None => BanStatus {
            banned: false,
            notice: None,
            ban: None,
        },
    };
    Ok(Json(status))
}

pub async fn ban_user(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<BanRequest>,
) -> ApiResult<(StatusCode, Json<UserBan>)> {
    let ban = state
        .gate
        .ban_user(user.as_ref(), user_id, &req.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(ban)))
}

pub async fn unban_user(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.gate.unban_user(user.as_ref(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn ban_history(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<UserBan>>> {
    Ok(Json(state.gate.ban_history(user.as_ref(), user_id).await?))
}
