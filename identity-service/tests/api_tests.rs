mod common;

use common::TestApp;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "email": "alice@example.com",
            "password": "pass_word!",
            "phone": "5551234567",
            "role": "USER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    // Acknowledgment only; no credentials in the signup response
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_never_stores_plaintext_password() {
    let app = TestApp::spawn().await;

    let id = app.signup("alice@example.com", "5551234567", "USER").await;

    let user_id = UserId::from_string(&id).unwrap();
    let stored = app
        .repository
        .find_by_id(&user_id)
        .await
        .unwrap()
        .expect("User not stored");
    assert_ne!(stored.password_hash, "pass_word!");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict_creates_nothing() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;

    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": "Another",
            "last_name": "Person",
            "email": "alice@example.com",
            "password": "pass_word!",
            "phone": "5559876543",
            "role": "USER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("already"));

    // The conflict must short-circuit: user count unchanged
    assert_eq!(app.repository.user_count(), 1);
}

#[tokio::test]
async fn test_signup_duplicate_phone_conflict() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;

    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": "Another",
            "last_name": "Person",
            "email": "other@example.com",
            "password": "pass_word!",
            "phone": "5551234567",
            "role": "USER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.repository.user_count(), 1);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "email": "not-an-email",
            "password": "pass_word!",
            "phone": "5551234567",
            "role": "USER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_signup_unknown_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "email": "alice@example.com",
            "password": "pass_word!",
            "phone": "5551234567",
            "role": "SUPERUSER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::spawn().await;

    // Missing fields
    let response = app
        .post("/users/login")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    // Wrongly-typed field
    let response = app
        .post("/users/signup")
        .json(&json!({
            "first_name": 42,
            "last_name": "Smith",
            "email": "alice@example.com",
            "password": "pass_word!",
            "phone": "5551234567",
            "role": "USER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_login_returns_record_with_fresh_tokens() {
    let app = TestApp::spawn().await;

    let id = app.signup("alice@example.com", "5551234567", "USER").await;

    let response = app
        .post("/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "USER");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    // The stored hash never leaves the server
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Round-trip: immediately verified claims carry the issuing identity
    let claims = app
        .token_issuer
        .verify_access(body["access_token"].as_str().unwrap())
        .expect("Access token must verify");
    assert_eq!(claims.sub, id);
    assert_eq!(claims.role, "USER");
    assert_eq!(claims.email, "alice@example.com");

    let refresh = app
        .token_issuer
        .verify_refresh(body["refresh_token"].as_str().unwrap())
        .expect("Refresh token must verify");
    assert!(refresh.exp >= claims.exp);
}

#[tokio::test]
async fn test_login_wrong_password_generic_error() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;

    let response = app
        .post("/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "email or password is not correct");
}

#[tokio::test]
async fn test_login_unknown_email_same_generic_error() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "email or password is not correct");
}

#[tokio::test]
async fn test_get_own_profile() {
    let app = TestApp::spawn().await;

    let id = app.signup("alice@example.com", "5551234567", "USER").await;
    let token = app.login("alice@example.com").await;

    let response = app
        .get_authenticated(&format!("/users/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["first_name"], "Test");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_other_profile_forbidden_for_user() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;
    let other_id = app.signup("bob@example.com", "5559876543", "USER").await;
    let token = app.login("alice@example.com").await;

    let response = app
        .get_authenticated(&format!("/users/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_other_profile_allowed_for_admin() {
    let app = TestApp::spawn().await;

    app.signup("admin@example.com", "5550001111", "ADMIN").await;
    let other_id = app.signup("bob@example.com", "5559876543", "USER").await;
    let token = app.login("admin@example.com").await;

    let response = app
        .get_authenticated(&format!("/users/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "bob@example.com");
}

#[tokio::test]
async fn test_get_user_requires_token() {
    let app = TestApp::spawn().await;

    let id = app.signup("alice@example.com", "5551234567", "USER").await;

    let response = app
        .get(&format!("/users/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated(&format!("/users/{}", id), "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_doubled_bearer_scheme_rejected() {
    let app = TestApp::spawn().await;

    let id = app.signup("alice@example.com", "5551234567", "USER").await;
    let token = app.login("alice@example.com").await;

    // bearer_auth prepends the scheme, so the header reads
    // "Bearer Bearer <token>"
    let response = app
        .get_authenticated(&format!("/users/{}", id), &format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;
    let token = app.login("alice@example.com").await;

    let response = app
        .get_authenticated("/users/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;

    app.signup("admin@example.com", "5550001111", "ADMIN").await;
    let token = app.login("admin@example.com").await;

    let response = app
        .get_authenticated(
            "/users/00000000-0000-4000-8000-000000000000",
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_admin_only() {
    let app = TestApp::spawn().await;

    app.signup("alice@example.com", "5551234567", "USER").await;
    let token = app.login("alice@example.com").await;

    let response = app
        .get_authenticated("/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_paginated() {
    let app = TestApp::spawn().await;

    app.signup("admin@example.com", "5550001111", "ADMIN").await;
    app.signup("alice@example.com", "5551234567", "USER").await;
    app.signup("bob@example.com", "5559876543", "USER").await;
    let token = app.login("admin@example.com").await;

    let response = app
        .get_authenticated("/users?page=1&limit=2", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["total"], 3);

    let response = app
        .get_authenticated("/users?page=2&limit=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_users_rejects_oversized_limit() {
    let app = TestApp::spawn().await;

    app.signup("admin@example.com", "5550001111", "ADMIN").await;
    let token = app.login("admin@example.com").await;

    let response = app
        .get_authenticated("/users?limit=500", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_rejects_overflowing_page() {
    let app = TestApp::spawn().await;

    app.signup("admin@example.com", "5550001111", "ADMIN").await;
    let token = app.login("admin@example.com").await;

    let response = app
        .get_authenticated(&format!("/users?page={}&limit=100", u64::MAX), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
