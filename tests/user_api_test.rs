//! HTTP tests for account administration, health and docs.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{error_code, TestApp};
use loan_desk::domain::UserRole;

#[tokio::test]
async fn test_list_users_admin_only() {
    let app = TestApp::new();
    let (_, user) = app.account("Alice", UserRole::User).await;
    let (_, verifier) = app.account("Vera", UserRole::Verifier).await;
    let (_, admin) = app.account("Ada", UserRole::Admin).await;

    let (status, users) = app.get("/users", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    for token in [user, verifier] {
        let (status, body) = app.get("/users", &token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_code(&body), "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_change_role() {
    let app = TestApp::new();
    let (alice, user) = app.account("Alice", UserRole::User).await;
    let (_, admin) = app.account("Ada", UserRole::Admin).await;
    let uri = format!("/users/{}", alice.id);

    let (status, body) = app.patch(&uri, &admin, json!({ "role": "verifier" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "verifier");

    let (status, _) = app.patch(&uri, &admin, json!({ "role": "superuser" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.patch(&uri, &user, json!({ "role": "admin" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let missing = format!("/users/{}", Uuid::new_v4());
    let (status, _) = app.patch(&missing, &admin, json!({ "role": "admin" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new();
    let (ada, admin) = app.account("Ada", UserRole::Admin).await;
    let uri = format!("/users/{}", ada.id);

    for _ in 0..2 {
        let (status, body) = app.delete(&uri, &admin).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    let (_, users) = app.get("/users", &admin).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let (alice, user) = app.account("Alice", UserRole::User).await;
    let (_, admin) = app.account("Ada", UserRole::Admin).await;
    let uri = format!("/users/{}", alice.id);

    let (status, _) = app.delete(&uri, &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reflects_store() {
    let (status, body) = TestApp::new().send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = TestApp::with_health(false)
        .send(Method::GET, "/health", None, None)
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, doc) = TestApp::new()
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/loan-applications/{id}"].is_object());
}
