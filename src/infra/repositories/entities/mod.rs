//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod loan_application;
pub mod user;
