//! Forum endpoints: the view-count side effect of opening a thread, reply
//! gating (identity, bans, locks), and the independence of the pinned and
//! locked moderation axes.

use axum::http::StatusCode;
use mockall::predicate::eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use domains::Page;
use integration_tests::{
    active_ban, admin, app, author, body_json, delete, forum_category, forum_post, forum_thread,
    get, member, send_json, token_for, Mocks,
};

#[tokio::test]
async fn opening_a_thread_records_exactly_one_view() {
    let thread = forum_thread(author(&member()));
    let thread_id = thread.id;
    let mut mocks = Mocks::default();
    mocks
        .forum
        .expect_record_view()
        .with(eq(thread_id))
        .once()
        .returning(|_| Ok(()));
    {
        let thread = thread.clone();
        mocks
            .forum
            .expect_thread()
            .with(eq(thread_id))
            .returning(move |_| Ok(thread.clone()));
    }
    mocks
        .forum
        .expect_posts()
        .with(eq(thread_id))
        .returning(move |id| Ok(vec![forum_post(id, author(&member()))]));
    let app = app(mocks);

    let response = app
        .oneshot(get(&format!("/api/forum/threads/{thread_id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn thread_listing_paginates_under_its_category() {
    let category = forum_category();
    let category_id = category.id;
    let mut mocks = Mocks::default();
    mocks
        .forum
        .expect_category_by_slug()
        .with(eq("general"))
        .returning(move |_| Ok(category.clone()));
    mocks
        .forum
        .expect_threads()
        .withf(move |id, page| *id == category_id && *page == 3)
        .returning(|_, page| {
            Ok(Page::new(
                vec![forum_thread(author(&member()))],
                page,
                45,
            ))
        });
    let app = app(mocks);

    let response = app
        .oneshot(get("/api/forum/categories/general/threads?page=3", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["category"]["slug"], "general");
}

#[tokio::test]
async fn replying_requires_a_signed_in_caller() {
    let app = app(Mocks::default());

    let response = app
        .oneshot(send_json(
            "POST",
            &format!("/api/forum/threads/{}/posts", Uuid::new_v4()),
            json!({ "content": "hello" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn a_banned_caller_cannot_reply_and_sees_the_notice() {
    let caller = member();
    let caller_id = caller.id;
    let mut mocks = Mocks::default();
    mocks
        .bans
        .expect_active_ban()
        .with(eq(caller_id))
        .returning(|id| Ok(Some(active_ban(id))));
    let app = app(mocks);

    let response = app
        .oneshot(send_json(
            "POST",
            &format!("/api/forum/threads/{}/posts", Uuid::new_v4()),
            json!({ "content": "hello" }),
            Some(&token_for(&caller)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["banned"]["reason"], "spam");
    assert!(body["banned"]["banned_at"].is_string());
}

#[tokio::test]
async fn a_locked_thread_refuses_replies_even_from_admins() {
    let caller = admin();
    let mut thread = forum_thread(author(&caller));
    thread.is_locked = true;
    let thread_id = thread.id;
    let mut mocks = Mocks::default();
    mocks.bans.expect_active_ban().returning(|_| Ok(None));
    mocks
        .forum
        .expect_thread()
        .with(eq(thread_id))
        .returning(move |_| Ok(thread.clone()));
    let app = app(mocks);

    let response = app
        .oneshot(send_json(
            "POST",
            &format!("/api/forum/threads/{thread_id}/posts"),
            json!({ "content": "still closed" }),
            Some(&token_for(&caller)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn pinning_and_unpinning_leaves_the_lock_untouched() {
    let moderator = admin();
    let mut thread = forum_thread(author(&member()));
    thread.is_locked = true;
    let thread_id = thread.id;
    let mut mocks = Mocks::default();
    mocks
        .forum
        .expect_set_pinned()
        .with(eq(thread_id), eq(true))
        .once()
        .returning({
            let thread = thread.clone();
            move |_, pinned| {
                let mut t = thread.clone();
                t.is_pinned = pinned;
                Ok(t)
            }
        });
    mocks
        .forum
        .expect_set_pinned()
        .with(eq(thread_id), eq(false))
        .once()
        .returning(move |_, pinned| {
            let mut t = thread.clone();
            t.is_pinned = pinned;
            Ok(t)
        });
    let app = app(mocks);
    let token = token_for(&moderator);

    let pinned = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/forum/threads/{thread_id}/pinned"),
            json!({ "pinned": true }),
            Some(&token),
        ))
        .await
        .unwrap();
    let pinned = body_json(pinned).await;
    assert_eq!(pinned["is_pinned"], true);
    assert_eq!(pinned["is_locked"], true);

    let unpinned = app
        .oneshot(send_json(
            "PUT",
            &format!("/api/forum/threads/{thread_id}/pinned"),
            json!({ "pinned": false }),
            Some(&token),
        ))
        .await
        .unwrap();
    let unpinned = body_json(unpinned).await;
    assert_eq!(unpinned["is_pinned"], false);
    assert_eq!(unpinned["is_locked"], true);
}

#[tokio::test]
async fn moderation_endpoints_refuse_members() {
    let thread_id = Uuid::new_v4();
    let token = token_for(&member());
    let app = app(Mocks::default());

    let pin = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/api/forum/threads/{thread_id}/pinned"),
            json!({ "pinned": true }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(pin.status(), StatusCode::FORBIDDEN);

    let drop = app
        .oneshot(delete(&format!("/api/forum/threads/{thread_id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(drop.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_a_post_is_owner_or_admin() {
    let owner = member();
    let stranger = member();
    let post = forum_post(Uuid::new_v4(), author(&owner));
    let post_id = post.id;

    let mut mocks = Mocks::default();
    mocks
        .forum
        .expect_post()
        .with(eq(post_id))
        .returning(move |_| Ok(post.clone()));
    let router = app(mocks);

    let refused = router
        .clone()
        .oneshot(delete(
            &format!("/api/forum/posts/{post_id}"),
            Some(&token_for(&stranger)),
        ))
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    let mut mocks = Mocks::default();
    let post = forum_post(Uuid::new_v4(), author(&owner));
    let post_id = post.id;
    mocks
        .forum
        .expect_post()
        .returning(move |_| Ok(post.clone()));
    mocks
        .forum
        .expect_delete_post()
        .with(eq(post_id))
        .once()
        .returning(|_| Ok(()));
    let allowed = app(mocks)
        .oneshot(delete(
            &format!("/api/forum/posts/{post_id}"),
            Some(&token_for(&owner)),
        ))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::NO_CONTENT);
}
