//! Contact form and newsletter endpoints. Subscribe and contact are public;
//! sending a broadcast is admin only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use domains::models::NewsletterSubscriber;
use services::BroadcastReport;

use crate::error::ApiResult;
use crate::extract::MaybeUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

pub async fn contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .newsletter
        .contact(&req.name, &req.email, &req.subject, &req.message)
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> ApiResult<(StatusCode, Json<NewsletterSubscriber>)> {
    let subscriber = state.content.subscribe(&req.email).await?;
    Ok((StatusCode::CREATED, Json(subscriber)))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> ApiResult<Json<OkResponse>> {
    state.content.unsubscribe(&req.email).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// Admin only. Tolerates per-recipient failures and reports them; aborts
/// with a 500 only when the mailer has no credentials at all.
pub async fn send_newsletter(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<BroadcastRequest>,
) -> ApiResult<Json<BroadcastReport>> {
    state.gate.require_admin(user.as_ref())?;
    let report = state
        .newsletter
        .broadcast(&req.subject, &req.content, req.html.as_deref())
        .await?;
    Ok(Json(report))
}
