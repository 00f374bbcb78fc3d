//! The full route table, everything mounted under `/api` except the socket,
//! the health probe, and the metrics exposition.

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{auth, chat, content, forum, mail, moderation};
use crate::middleware::{cors_policy, trace_layer, track_metrics};
use crate::state::AppState;
use crate::ws;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // accounts
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/me/ban", get(moderation::my_ban))
        // articles
        .route("/articles", get(content::list_articles).post(content::create_article))
        .route("/articles/featured", get(content::featured_articles))
        .route(
            "/articles/{id}",
            get(content::get_article)
                .put(content::update_article)
                .delete(content::delete_article),
        )
        // daily topic
        .route("/daily-topic", get(content::topic_of_the_day))
        .route("/daily-topics", get(content::list_topics).post(content::save_topic))
        .route("/daily-topics/{id}", delete(content::delete_topic))
        // forum
        .route("/forum/categories", get(forum::categories))
        .route(
            "/forum/categories/{slug}/threads",
            get(forum::category_threads).post(forum::create_thread),
        )
        .route(
            "/forum/threads/{id}",
            get(forum::open_thread).delete(forum::delete_thread),
        )
        .route("/forum/threads/{id}/posts", post(forum::reply))
        .route("/forum/threads/{id}/pinned", put(forum::set_pinned))
        .route("/forum/threads/{id}/locked", put(forum::set_locked))
        .route(
            "/forum/posts/{id}",
            put(forum::edit_post).delete(forum::delete_post),
        )
        // chat over HTTP
        .route("/chat/messages", get(chat::recent).post(chat::post))
        .route("/chat/messages/{id}", delete(chat::delete))
        .route("/chat/online", get(chat::online))
        // moderation
        .route(
            "/users/{id}/ban",
            post(moderation::ban_user).delete(moderation::unban_user),
        )
        .route("/users/{id}/bans", get(moderation::ban_history))
        // talents
        .route("/talents", get(content::list_talents).post(content::create_talent))
        .route("/talents/categories", get(content::talent_categories))
        .route(
            "/talents/{id}",
            get(content::get_talent)
                .put(content::update_talent)
                .delete(content::delete_talent),
        )
        // archive
        .route("/archive/categories", get(content::archive_categories))
        .route(
            "/archive/documents",
            get(content::list_documents).post(content::create_document),
        )
        .route(
            "/archive/documents/{id}",
            get(content::get_document)
                .put(content::update_document)
                .delete(content::delete_document),
        )
        // team and static pages
        .route("/team", get(content::team).post(content::create_team_member))
        .route(
            "/team/{id}",
            put(content::update_team_member).delete(content::delete_team_member),
        )
        .route("/pages/{slug}", get(content::get_page).put(content::save_page))
        // mail
        .route("/contact", post(mail::contact))
        .route("/newsletter/subscribe", post(mail::subscribe))
        .route("/newsletter/unsubscribe", post(mail::unsubscribe))
        .route("/newsletter/send", post(mail::send_newsletter));

    Router::new()
        .nest("/api", api)
        .route("/ws/chat", get(ws::chat_socket))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .layer(from_fn_with_state(state.metrics.clone(), track_metrics))
        .layer(trace_layer())
        .layer(cors_policy())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn metrics(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> ([(axum::http::HeaderName, &'static str); 1], String) {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        state.metrics.render(),
    )
}
