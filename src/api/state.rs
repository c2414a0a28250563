//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the store
//! health check.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, HealthCheck};
use crate::services::{AuthService, LoanService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User management service
    pub user_service: Arc<dyn UserService>,
    /// Loan application service
    pub loan_service: Arc<dyn LoanService>,
    /// Store connectivity check
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create application state backed by the database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(&services, database)
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            loan_service: services.loans(),
            health,
        }
    }
}
