//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and every protected operation passes through
//! the authorization policy before touching storage.

mod auth_service;
pub mod container;
mod guard;
mod loan_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    normalize_email, AuthService, Authenticator, Claims, NewAccount, TokenResponse,
};
pub use loan_service::{ApplicationUpdate, LoanManager, LoanService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
