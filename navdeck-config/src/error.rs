//! Typed error variants for the navdeck-config crate.
//!
//! Provides structured error types for config I/O and validation operations.
//! `Config::load` and `Config::save` still return `anyhow::Result`; callers
//! that care about the failure mode can `downcast_ref::<ConfigError>()`.

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// A path resolved outside the expected configuration directory.
    #[error("Path traversal detected: {0}")]
    PathTraversal(String),
}
