//! # guard-cli
//!
//! Argument parsing and environment config for the `mguard` binary. Wiring of stores,
//! classifier and pipeline lives in `main.rs`.

pub mod cli;
pub mod config;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
