//! Configuration system for the navdeck navigation core.
//!
//! This crate provides configuration loading, saving, and default values
//! for the permission router and tab session. It includes:
//!
//! - The `Config` struct and its YAML persistence
//! - Default value functions used by serde
//! - Typed errors for config I/O and validation

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
