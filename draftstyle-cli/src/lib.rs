//! Library crate exposing the draftstyle command-line front end
//!
//! This exposes configuration and command dispatch for integration tests

pub mod commands;
pub mod config;

pub use commands::execute;
pub use config::{AppConfig, CliConfig, ConfigManager, StyleCommand};
