//! Articles, daily topic, talents, archive, team, and static pages. Listing
//! endpoints accept `?lang=` and then respond with the localized projection
//! instead of the raw bilingual entity.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::{
    ArchiveCategory, ArchiveDocument, Article, ArticlePatch, DailyTopic, NewArchiveDocument,
    NewArticle, NewDailyTopic, NewTalent, NewTeamMember, StaticPage, Talent, TalentCategory,
    TeamMember,
};
use domains::Page;

use crate::error::ApiResult;
use crate::extract::MaybeUser;
use crate::handlers::PageQuery;
use crate::state::AppState;
use crate::views::{ArticleSummary, TopicView};

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub lang: Option<domains::Lang>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl ListQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Either the raw bilingual page or its localized projection, depending on
/// whether the caller asked for a language.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ArticleListing {
    Bilingual(Page<Article>),
    Localized(Page<ArticleSummary>),
}

// ── Articles ────────────────────────────────────────────────────────────

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ArticleListing>> {
    let page = state.content.articles(query.page()).await?;
    let listing = match query.lang {
        Some(lang) => ArticleListing::Localized(Page {
            items: page
                .items
                .iter()
                .map(|a| ArticleSummary::project(a, lang))
                .collect(),
            page: page.page,
            total: page.total,
            total_pages: page.total_pages,
        }),
        None => ArticleListing::Bilingual(page),
    };
    Ok(Json(listing))
}

pub async fn featured_articles(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Article>>> {
    Ok(Json(state.content.featured_articles().await?))
}

#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub related: Vec<Article>,
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleDetail>> {
    let article = state.content.article(id).await?;
    let related = state.content.related_articles(&article).await?;
    Ok(Json(ArticleDetail { article, related }))
}

pub async fn create_article(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewArticle>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    let article = state.content.create_article(user.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<ArticlePatch>,
) -> ApiResult<Json<Article>> {
    Ok(Json(
        state.content.update_article(user.as_ref(), id, patch).await?,
    ))
}

pub async fn delete_article(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.content.delete_article(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Daily topic ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TopicResponse {
    Bilingual(Option<DailyTopic>),
    Localized(Option<TopicView>),
}

#[derive(Debug, Deserialize, Default)]
pub struct TopicQuery {
    #[serde(default)]
    pub lang: Option<domains::Lang>,
    /// A specific day instead of "today".
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
}

pub async fn topic_of_the_day(
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> ApiResult<Json<TopicResponse>> {
    let topic = match query.date {
        Some(date) => Some(state.content.topic_for(date).await?),
        None => state.content.topic_of_the_day().await?,
    };
    let response = match query.lang {
        Some(lang) => TopicResponse::Localized(topic.as_ref().map(|t| TopicView::project(t, lang))),
        None => TopicResponse::Bilingual(topic),
    };
    Ok(Json(response))
}

pub async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<DailyTopic>>> {
    Ok(Json(state.content.topics(query.page()).await?))
}

pub async fn save_topic(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewDailyTopic>,
) -> ApiResult<Json<DailyTopic>> {
    Ok(Json(state.content.save_topic(user.as_ref(), new).await?))
}

pub async fn delete_topic(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.content.delete_topic(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Talents ─────────────────────────────────────────────────────────────

pub async fn talent_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TalentCategory>>> {
    Ok(Json(state.content.talent_categories().await?))
}

pub async fn list_talents(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<Talent>>> {
    Ok(Json(
        state.content.talents(query.category_id, query.page()).await?,
    ))
}

pub async fn get_talent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Talent>> {
    Ok(Json(state.content.talent(id).await?))
}

pub async fn create_talent(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewTalent>,
) -> ApiResult<(StatusCode, Json<Talent>)> {
    let talent = state.content.create_talent(user.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(talent)))
}

pub async fn update_talent(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(new): Json<NewTalent>,
) -> ApiResult<Json<Talent>> {
    Ok(Json(
        state.content.update_talent(user.as_ref(), id, new).await?,
    ))
}

pub async fn delete_talent(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.content.delete_talent(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Archive ─────────────────────────────────────────────────────────────

pub async fn archive_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ArchiveCategory>>> {
    Ok(Json(state.content.archive_categories().await?))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Page<ArchiveDocument>>> {
    Ok(Json(
        state
            .content
            .archive_documents(query.category_id, query.page())
            .await?,
    ))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArchiveDocument>> {
    Ok(Json(state.content.archive_document(id).await?))
}

pub async fn create_document(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewArchiveDocument>,
) -> ApiResult<(StatusCode, Json<ArchiveDocument>)> {
    let doc = state.content.create_document(user.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

pub async fn update_document(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(new): Json<NewArchiveDocument>,
) -> ApiResult<Json<ArchiveDocument>> {
    Ok(Json(
        state.content.update_document(user.as_ref(), id, new).await?,
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.content.delete_document(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Team ────────────────────────────────────────────────────────────────

pub async fn team(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamMember>>> {
    Ok(Json(state.content.team().await?))
}

pub async fn create_team_member(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewTeamMember>,
) -> ApiResult<(StatusCode, Json<TeamMember>)> {
    let member = state
        .content
        .save_team_member(user.as_ref(), None, new)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_team_member(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(new): Json<NewTeamMember>,
) -> ApiResult<Json<TeamMember>> {
    Ok(Json(
        state
            .content
            .save_team_member(user.as_ref(), Some(id), new)
            .await?,
    ))
}

pub async fn delete_team_member(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.content.delete_team_member(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Static pages ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    pub content_uk: serde_json::Value,
    pub content_en: serde_json::Value,
}

pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<StaticPage>> {
    Ok(Json(state.content.page(&slug).await?))
}

pub async fn save_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(slug): Path<String>,
    Json(req): Json<SavePageRequest>,
) -> ApiResult<Json<StaticPage>> {
    Ok(Json(
        state
            .content
            .save_page(user.as_ref(), &slug, req.content_uk, req.content_en)
            .await?,
    ))
}
