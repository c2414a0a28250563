//! Domain layer - Core business entities and rules
//!
//! Users, loan applications and their status state machine, plus the
//! authorization policy and capability resolution. No I/O lives here.

pub mod capabilities;
pub mod filter;
pub mod loan_application;
pub mod password;
pub mod policy;
pub mod user;

pub use capabilities::Capabilities;
pub use filter::ApplicationFilter;
pub use loan_application::{LoanApplication, LoanApplicationView, LoanStatus, Revision};
pub use password::Password;
pub use policy::{authorize, list_scope, Actor, Denial, ListScope, Operation};
pub use user::{NewUser, User, UserResponse, UserRole, UserSummary};
