//! Environment-driven settings and the constants shared across layers
//! (roles, statuses, token and validation limits).

mod constants;
mod settings;

pub use constants::*;
pub use settings::{Config, ConfigError};
