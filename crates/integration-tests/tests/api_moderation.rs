//! Ban management: admin-only access, the required reason, and the gate's
//! effect on write endpoints while a ban is active.

use axum::http::StatusCode;
use mockall::predicate::eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use integration_tests::{
    active_ban, admin, app, body_json, delete, get, member, send_json, token_for, Mocks,
};

#[tokio::test]
async fn banning_requires_the_admin_role() {
    let target = Uuid::new_v4();
    let app = app(Mocks::default());

    let anonymous = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/users/{target}/ban"),
            json!({ "reason": "spam" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let as_member = app
        .oneshot(send_json(
            "POST",
            &format!("/api/users/{target}/ban"),
            json!({ "reason": "spam" }),
            Some(&token_for(&member())),
        ))
        .await
        .unwrap();
    assert_eq!(as_member.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn banning_needs_a_reason() {
    let target = Uuid::new_v4();
    let app = app(Mocks::default());

    let response = app
        .oneshot(send_json(
            "POST",
            &format!("/api/users/{target}/ban"),
            json!({ "reason": "   " }),
            Some(&token_for(&admin())),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn an_admin_can_ban_and_unban() {
    let target = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks
        .bans
        .expect_ban()
        .withf(move |user_id, reason| *user_id == target && reason == "spam")
        .once()
        .returning(|user_id, _| Ok(active_ban(user_id)));
    mocks
        .bans
        .expect_unban()
        .with(eq(target))
        .once()
        .returning(|_| Ok(()));
    let app = app(mocks);
    let token = token_for(&admin());

    let banned = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/users/{target}/ban"),
            json!({ "reason": "spam" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(banned.status(), StatusCode::CREATED);
    let body = body_json(banned).await;
    assert_eq!(body["user_id"], target.to_string());
    assert_eq!(body["is_active"], true);

    let unbanned = app
        .oneshot(delete(&format!("/api/users/{target}/ban"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(unbanned.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ban_history_is_admin_only() {
    let target = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks
        .bans
        .expect_history()
        .with(eq(target))
        .returning(|user_id| {
            let mut old = active_ban(user_id);
            old.is_active = false;
            old.unbanned_at = Some(chrono::Utc::now());
            Ok(vec![active_ban(user_id), old])
        });
    let app = app(mocks);

    let as_member = app
        .clone()
        .oneshot(get(
            &format!("/api/users/{target}/bans"),
            Some(&token_for(&member())),
        ))
        .await
        .unwrap();
    assert_eq!(as_member.status(), StatusCode::FORBIDDEN);

    let as_admin = app
        .oneshot(get(
            &format!("/api/users/{target}/bans"),
            Some(&token_for(&admin())),
        ))
        .await
        .unwrap();
    assert_eq!(as_admin.status(), StatusCode::OK);
    let body = body_json(as_admin).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn a_banned_caller_can_read_their_own_notice() {
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
        .oneshot(get("/api/auth/me/ban", Some(&token_for(&caller))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["banned"], true);
    assert_eq!(body["ban"]["reason"], "spam");
    assert!(body["notice"].as_str().unwrap().contains("spam"));
}

#[tokio::test]
async fn a_ban_blocks_chat_but_not_reading() {
    let caller = member();
    let caller_id = caller.id;
    let mut mocks = Mocks::default();
    mocks
        .bans
        .expect_active_ban()
        .with(eq(caller_id))
        .returning(|id| Ok(Some(active_ban(id))));
    mocks.chat.expect_recent().returning(|_| Ok(Vec::new()));
    let app = app(mocks);
    let token = token_for(&caller);

    let write = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/chat/messages",
            json!({ "body": "hi" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(write.status(), StatusCode::FORBIDDEN);

    let read = app
        .oneshot(get("/api/chat/messages", Some(&token)))
        .await
        .unwrap();
    assert_eq!(read.status(), StatusCode::OK);
}
