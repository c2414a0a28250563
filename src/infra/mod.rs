//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, health check and migrations
//! - SeaORM entities and repositories
//! - Unit of Work for repository access

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, HealthCheck, Migrator};
pub use repositories::{
    LoanApplicationRepository, LoanApplicationStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockLoanApplicationRepository, MockUserRepository};
