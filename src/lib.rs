//! Loan Desk - role-based loan application service.
//!
//! Applicants (`user`) submit loan applications, verifiers review them and
//! admins review, delete and manage accounts. Every protected operation is
//! decided by a single pure policy in [`domain::policy`].
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, state machine, authorization policy, filters
//! - **services**: Use cases over a Unit of Work
//! - **infra**: Database, entities, repositories and migrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! loan-desk migrate up
//! loan-desk accounts create --email admin@example.com --password 'change-me!' --role admin
//! loan-desk serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{LoanApplication, LoanStatus, Password, User, UserRole};
pub use errors::{AppError, AppResult};
