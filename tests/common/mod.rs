//! Shared fixtures for HTTP-level tests.
//!
//! Drives the real router and services over an in-memory Unit of Work, so no
//! database is needed.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use loan_desk::config::{Config, DUMMY_PASSWORD_HASH};
use loan_desk::domain::{ListScope, LoanApplication, NewUser, User, UserRole};
use loan_desk::errors::{AppError, AppResult};
use loan_desk::infra::{HealthCheck, LoanApplicationRepository, UnitOfWork, UserRepository};
use loan_desk::services::{Claims, Services};
use loan_desk::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("User"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MemoryLoans {
    rows: Mutex<Vec<LoanApplication>>,
}

#[async_trait]
impl LoanApplicationRepository for MemoryLoans {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LoanApplication>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self, scope: ListScope) -> AppResult<Vec<LoanApplication>> {
        let mut apps: Vec<LoanApplication> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| match scope {
                ListScope::All => true,
                ListScope::OwnedBy(owner) => a.user_id == owner,
            })
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }

    async fn insert(&self, application: LoanApplication) -> AppResult<LoanApplication> {
        self.rows.lock().unwrap().push(application.clone());
        Ok(application)
    }

    async fn save(&self, application: LoanApplication) -> AppResult<LoanApplication> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or(AppError::NotFound)?;
        *row = LoanApplication {
            created_at: row.created_at,
            ..application
        };
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub users: Arc<MemoryUsers>,
    pub loans: Arc<MemoryLoans>,
}

impl UnitOfWork for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn loan_applications(&self) -> Arc<dyn LoanApplicationRepository> {
        self.loans.clone()
    }
}

/// Health check with a fixed answer
pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::internal("store unreachable"))
        }
    }
}

// =============================================================================
// Test application
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_health(true)
    }

    pub fn with_health(healthy: bool) -> Self {
        let store = Arc::new(MemoryStore::default());
        let config = Config::new(TEST_SECRET).unwrap();
        let services = Services::from_unit_of_work(store.clone(), config);
        let state = AppState::new(&services, Arc::new(StaticHealth(healthy)));

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Seed an account directly and return it with a signed bearer token.
    pub async fn account(&self, name: &str, role: UserRole) -> (User, String) {
        let user = self
            .store
            .users
            .create(NewUser {
                name: Some(name.to_string()),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: DUMMY_PASSWORD_HASH.to_string(),
                role,
            })
            .await
            .unwrap();
        let token = token_for(&user);
        (user, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Create an application as `token`'s owner and return its id.
    pub async fn apply(&self, token: &str, amount: f64, purpose: &str) -> String {
        let (status, body) = self
            .post(
                "/loan-applications",
                token,
                serde_json::json!({ "amount": amount, "purpose": purpose }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

pub fn token_for(user: &User) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
