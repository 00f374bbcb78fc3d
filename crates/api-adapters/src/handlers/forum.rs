//! Forum categories, threads, posts, and the two admin moderation axes.
//! Pin and lock are separate flags set through separate endpoints, so
//! toggling one can never disturb the other.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::{ForumCategory, ForumPost, ForumThread};
use domains::Page;

use crate::error::ApiResult;
use crate::extract::MaybeUser;
use crate::handlers::PageQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewThreadRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub pinned: bool,
}

#[derive(Debug, Deserialize)]
pub struct LockRequest {
    pub locked: bool,
}

#[derive(Debug, Serialize)]
pub struct ThreadDetail {
    pub thread: ForumThread,
    pub posts: Vec<ForumPost>,
}

pub async fn categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ForumCategory>>> {
    Ok(Json(state.forum.categories().await?))
}

#[derive(Debug, Serialize)]
pub struct CategoryThreads {
    pub category: ForumCategory,
    #[serde(flatten)]
    pub threads: Page<ForumThread>,
}

pub async fn category_threads(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CategoryThreads>> {
    let category = state.forum.category(&slug).await?;
    let threads = state.forum.threads(category.id, query.page()).await?;
    Ok(Json(CategoryThreads { category, threads }))
}

pub async fn create_thread(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(slug): Path<String>,
    Json(req): Json<NewThreadRequest>,
) -> ApiResult<(StatusCode, Json<ForumThread>)> {
    let category = state.forum.category(&slug).await?;
    let thread = state
        .forum
        .create_thread(user.as_ref(), category.id, &req.title, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

/// Opening a thread records one view, then returns it with its posts.
pub async fn open_thread(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ThreadDetail>> {
    let (thread, posts) = state.forum.open_thread(id).await?;
    Ok(Json(ThreadDetail { thread, posts }))
}

pub async fn delete_thread(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.forum.delete_thread(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reply(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PostRequest>,
) -> ApiResult<(StatusCode, Json<ForumPost>)> {
    let post = state.forum.reply(user.as_ref(), id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn edit_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PostRequest>,
) -> ApiResult<Json<ForumPost>> {
    Ok(Json(
        state.forum.edit_post(user.as_ref(), id, &req.content).await?,
    ))
}

pub async fn delete_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.forum.delete_post(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_pinned(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PinRequest>,
) -> ApiResult<Json<ForumThread>> {
    Ok(Json(
        state.forum.set_pinned(user.as_ref(), id, req.pinned).await?,
    ))
}

pub async fn set_locked(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(req): Json<LockRequest>,
) -> ApiResult<Json<ForumThread>> {
    Ok(Json(
        state.forum.set_locked(user.as_ref(), id, req.locked).await?,
    ))
}
