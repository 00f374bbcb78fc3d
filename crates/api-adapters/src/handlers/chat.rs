//! Chat over plain HTTP: the recent-history snapshot clients seed their
//! feed from, posting and deleting for clients without a socket, and the
//! current presence count. The live stream itself is `ws::chat_socket`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::ChatMessage;

use crate::error::ApiResult;
use crate::extract::MaybeUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct OnlineResponse {
    pub online: usize,
}

pub async fn recent(State(state): State<AppState>) -> ApiResult<Json<Vec<ChatMessage>>> {
    Ok(Json(state.chat.recent().await?))
}

pub async fn post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<PostMessageRequest>,
) -> ApiResult<(StatusCode, Json<ChatMessage>)> {
    let message = state.chat.post(user.as_ref(), &req.body).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn delete(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.chat.delete(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn online(State(state): State<AppState>) -> Json<OnlineResponse> {
    Json(OnlineResponse {
        online: state.chat.online_count(),
    })
}
