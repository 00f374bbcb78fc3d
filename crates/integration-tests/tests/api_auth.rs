//! Account endpoints through the router: registration rules, the shared
//! login failure message, and token handling on `/api/auth/me`.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;

use domains::models::{Role, UserRecord};
use integration_tests::{app, body_json, get, member, send_json, token_for, Mocks};

#[tokio::test]
async fn registration_rejects_short_passwords_before_touching_storage() {
    // No expectation on the user repo: a call would panic the mock.
    let app = app(Mocks::default());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/auth/register",
            json!({ "username": "olena", "email": "olena@example.com", "password": "short" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registration_normalizes_the_email_and_returns_a_working_token() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_create()
        .withf(|username, email, _hash, role| {
            username == "olena" && email == "olena@example.com" && *role == Role::Member
        })
        .once()
        .returning(|username, email, _, role| {
            let mut identity = member();
            identity.username = username.to_string();
            identity.email = email.to_string();
            identity.role = role;
            Ok(identity)
        });
    let app = app(mocks);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/register",
            json!({ "username": "olena", "email": "  Olena@Example.COM ", "password": "correct horse" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();

    let me = app
        .oneshot(get("/api/auth/me", Some(token)))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let me = body_json(me).await;
    assert_eq!(me["email"], "olena@example.com");
}

#[tokio::test]
async fn login_answers_identically_for_unknown_account_and_wrong_password() {
    let mut mocks = Mocks::default();
    let known = member();
    let hash = auth_adapters::password::hash_password("correct horse").unwrap();
    mocks.users.expect_by_email().returning(move |email| {
        if email == "olena@example.com" {
            Ok(Some(UserRecord {
                identity: known.clone(),
                password_hash: hash.clone(),
                created_at: Utc::now(),
            }))
        } else {
            Ok(None)
        }
    });
    let app = app(mocks);

    let unknown = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": "whatever" }),
            None,
        ))
        .await
        .unwrap();
    let wrong_password = app
        .oneshot(send_json(
            "POST",
            "/api/auth/login",
            json!({ "email": "olena@example.com", "password": "incorrect" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let a = body_json(unknown).await;
    let b = body_json(wrong_password).await;
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn me_distinguishes_anonymous_from_invalid_tokens() {
    let app = app(Mocks::default());

    let anonymous = app
        .clone()
        .oneshot(get("/api/auth/me", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .clone()
        .oneshot(get("/api/auth/me", Some("not-a-token")))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let valid = app
        .oneshot(get("/api/auth/me", Some(&token_for(&member()))))
        .await
        .unwrap();
    assert_eq!(valid.status(), StatusCode::OK);
}
