//! HTTP tests for sign-up, sign-in and session handling.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{error_code, TestApp};
use loan_desk::domain::UserRole;
use loan_desk::infra::UserRepository;

async fn signup(app: &TestApp, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    app.send(Method::POST, "/auth/signup", None, Some(body)).await
}

#[tokio::test]
async fn test_signup_creates_user_role_account() {
    let app = TestApp::new();

    let (status, body) = signup(
        &app,
        json!({
            "name": "Alice",
            "email": "Alice@Example.com",
            "password": "password123",
            "role": "admin"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_signup_rejected() {
    let app = TestApp::new();
    let body = json!({ "name": "Alice", "email": "alice@example.com", "password": "password123" });

    let (first, _) = signup(&app, body.clone()).await;
    let (second, response) = signup(&app, body).await;
    let (shouted, shouted_response) = signup(
        &app,
        json!({ "name": "Eve", "email": "ALICE@example.com", "password": "password123" }),
    )
    .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "CONFLICT");
    assert_eq!(shouted, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&shouted_response), "CONFLICT");

    let users = app.store.users.list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_signup_missing_fields_rejected() {
    let app = TestApp::new();

    for body in [
        json!({ "email": "a@example.com", "password": "password123" }),
        json!({ "name": "", "email": "a@example.com", "password": "password123" }),
        json!({ "name": "A", "email": "not-an-email", "password": "password123" }),
        json!({ "name": "A", "email": "a@example.com", "password": "short" }),
    ] {
        let (status, response) = signup(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_signin_then_inspect_session() {
    let app = TestApp::new();
    signup(
        &app,
        json!({ "name": "Alice", "email": "alice@example.com", "password": "password123" }),
    )
    .await;

    let (status, token) = app
        .send(
            Method::POST,
            "/auth/signin",
            None,
            Some(json!({ "email": "alice@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "Bearer");

    let access_token = token["access_token"].as_str().unwrap();
    let (status, me) = app.get("/auth/me", access_token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "user");
    assert_eq!(me["capabilities"]["can_apply"], true);
    assert_eq!(me["capabilities"]["can_verify"], false);
    assert_eq!(me["capabilities"]["can_manage_users"], false);
}

#[tokio::test]
async fn test_signin_failures_look_the_same() {
    let app = TestApp::new();
    signup(
        &app,
        json!({ "name": "Alice", "email": "alice@example.com", "password": "password123" }),
    )
    .await;

    let (wrong_status, wrong_password) = app
        .send(
            Method::POST,
            "/auth/signin",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
        )
        .await;
    let (unknown_status, unknown_email) = app
        .send(
            Method::POST,
            "/auth/signin",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::new();

    for uri in ["/auth/me", "/loan-applications", "/users"] {
        let (status, body) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(error_code(&body), "UNAUTHORIZED");

        let (status, _) = app.get(uri, "not-a-token").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_capabilities_follow_role() {
    let app = TestApp::new();
    let (_, verifier) = app.account("Vera", UserRole::Verifier).await;
    let (_, admin) = app.account("Ada", UserRole::Admin).await;

    let (_, me) = app.get("/auth/me", &verifier).await;
    assert_eq!(me["capabilities"]["can_apply"], false);
    assert_eq!(me["capabilities"]["can_view_all_applications"], true);
    assert_eq!(me["capabilities"]["can_verify"], true);
    assert_eq!(me["capabilities"]["can_manage_users"], false);

    let (_, me) = app.get("/auth/me", &admin).await;
    assert_eq!(me["capabilities"]["can_manage_users"], true);
}
