//! Command-line entry points: `serve`, `migrate` and `accounts`.

pub mod args;

pub use args::{Cli, Commands};
