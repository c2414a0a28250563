//! Unit of Work - centralized repository access.
//!
//! Every service operation is a single read-modify-write against one row, so
//! no transaction scope is exposed; the store's per-row atomicity is relied
//! upon and concurrent updates resolve last-write-wins.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    LoanApplicationRepository, LoanApplicationStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get loan application repository
    fn loan_applications(&self) -> Arc<dyn LoanApplicationRepository>;
}

/// SeaORM-backed implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    loan_repo: Arc<LoanApplicationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over a shared connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            loan_repo: Arc::new(LoanApplicationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn loan_applications(&self) -> Arc<dyn LoanApplicationRepository> {
        self.loan_repo.clone()
    }
}
