//! Request handlers, grouped by resource.

pub mod auth_handler;
pub mod loan_handler;
pub mod user_handler;

pub use auth_handler::{auth_routes, session_routes};
pub use loan_handler::loan_routes;
pub use user_handler::user_routes;
