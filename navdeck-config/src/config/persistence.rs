//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `load_from` / `save` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_dir`, `config_path`)

use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default path, creating it with defaults
    /// when missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            let config_dir = Self::config_dir();
            if let Err(e) = Self::validate_config_path(&config_path, &config_dir) {
                log::error!("Config path validation failed: {e}");
                return Err(e.into());
            }
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename
        let temp_path = config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, config_path)?;

        log::debug!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Directory holding `config.yaml` and the persisted user session.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("navdeck"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG convention on all platforms: ~/.config/navdeck
            dirs::home_dir()
                .map(|home| home.join(".config").join("navdeck"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Validate that `path` (which must already exist on disk) resolves,
    /// symlinks included, to a location inside `expected_base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PathTraversal` when the canonical path escapes
    /// the base, `ConfigError::Io` if `path` cannot be canonicalized.
    pub fn validate_config_path(path: &Path, expected_base: &Path) -> Result<PathBuf, ConfigError> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("cannot canonicalize {}: {e}", path.display()),
            )
        })?;

        // If the base doesn't exist yet, use the un-resolved path.
        let canonical_base =
            fs::canonicalize(expected_base).unwrap_or_else(|_| expected_base.to_path_buf());

        if !canonical.starts_with(&canonical_base) {
            return Err(ConfigError::PathTraversal(format!(
                "path '{}' resolves to '{}' which is outside the expected directory '{}'",
                path.display(),
                canonical.display(),
                canonical_base.display(),
            )));
        }

        Ok(canonical)
    }
}
