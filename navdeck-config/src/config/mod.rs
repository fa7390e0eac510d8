//! The `Config` struct and its validation.
//!
//! Persistence (load/save and path resolution) lives in [`persistence`].

mod persistence;

use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};

/// Navigation core configuration.
///
/// Every field has a serde default, so an empty or partial YAML document
/// deserializes into a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the permanent home tab; also the target of the `/` redirect.
    #[serde(default = "crate::defaults::home_path")]
    pub home_path: String,

    /// Label of the home tab and title fallback for `/` and the home path.
    #[serde(default = "crate::defaults::home_label")]
    pub home_label: String,

    /// Title used when neither route metadata nor the path yields one.
    #[serde(default = "crate::defaults::untitled_label")]
    pub untitled_label: String,

    /// Where unauthenticated navigations are redirected.
    #[serde(default = "crate::defaults::login_path")]
    pub login_path: String,

    /// Where navigations to unknown routes are redirected.
    #[serde(default = "crate::defaults::not_found_path")]
    pub not_found_path: String,

    /// Where navigations the user may not see are redirected.
    #[serde(default = "crate::defaults::forbidden_path")]
    pub forbidden_path: String,

    /// Extra paths reachable without a token. The login, not-found and
    /// forbidden pages are always reachable whether listed here or not.
    #[serde(default = "crate::defaults::white_list")]
    pub white_list: Vec<String>,

    /// Initial `cached` flag for tabs opened by navigation.
    #[serde(default = "crate::defaults::bool_true")]
    pub cache_tabs_by_default: bool,

    /// Reject permission trees with duplicate ids/paths or parent cycles
    /// instead of walking them best-effort.
    #[serde(default = "crate::defaults::bool_false")]
    pub validate_permission_tree: bool,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_path: crate::defaults::home_path(),
            home_label: crate::defaults::home_label(),
            untitled_label: crate::defaults::untitled_label(),
            login_path: crate::defaults::login_path(),
            not_found_path: crate::defaults::not_found_path(),
            forbidden_path: crate::defaults::forbidden_path(),
            white_list: crate::defaults::white_list(),
            cache_tabs_by_default: true,
            validate_permission_tree: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Check that route paths are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("home_path", &self.home_path),
            ("login_path", &self.login_path),
            ("not_found_path", &self.not_found_path),
            ("forbidden_path", &self.forbidden_path),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
            if !value.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{field} must be an absolute route path, got '{value}'"
                )));
            }
        }
        if self.home_path == self.login_path {
            return Err(ConfigError::Validation(
                "home_path and login_path must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `path` is reachable without a signed-in session: the login,
    /// not-found and forbidden pages, plus everything in `white_list`.
    ///
    /// The guard redirects to these pages, so they can never be redirected
    /// away from themselves.
    pub fn is_white_listed(&self, path: &str) -> bool {
        path == self.login_path
            || path == self.not_found_path
            || path == self.forbidden_path
            || self.white_list.iter().any(|p| p == path)
    }
}
