//! Signed-in user session and the route guard.
//!
//! The session is stored in `~/.config/navdeck/user_session.yaml` so a
//! restarted host can pick up the last token and permission forest.

use crate::permission::{PermissionNode, PermissionTree};
use crate::router::{RouteNode, find_exact};
use anyhow::{Context, Result};
use navdeck_config::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Profile of the signed-in user, as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionNode>,
}

/// Token plus user profile. Signed out when either is absent.
///
/// The permission forest is moved out of [`UserInfo`] into a shared
/// [`PermissionTree`] at sign-in, so every consumer sees the same
/// allocation until the next sign-in.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Option<String>,
    user: Option<UserInfo>,
    permissions: PermissionTree,
}

/// On-disk form of [`AuthSession`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: UserInfo,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, token: impl Into<String>, mut user: UserInfo) {
        let roots = std::mem::take(&mut user.permissions);
        self.permissions = PermissionTree::new(roots);
        log::info!(
            "Signed in as '{}' ({} permission nodes)",
            user.username,
            self.permissions.node_count()
        );
        self.token = Some(token.into());
        self.user = Some(user);
    }

    /// Clear token, profile and permissions.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("Signed out '{}'", user.username);
        }
        self.token = None;
        self.permissions = PermissionTree::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty()) && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn permissions(&self) -> &PermissionTree {
        &self.permissions
    }

    /// Get the path to the persisted session file
    pub fn session_path() -> PathBuf {
        Config::config_dir().join("user_session.yaml")
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path())
    }

    /// Write the session as YAML. A signed-out session removes the file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let (Some(token), Some(user)) = (self.token.clone(), self.user.clone()) else {
            if path.exists() {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove session file {:?}", path))?;
            }
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let stored = StoredSession {
            token,
            user: UserInfo {
                permissions: self.permissions.roots().to_vec(),
                ..user
            },
        };
        let contents =
            serde_yaml_ng::to_string(&stored).context("Failed to serialize user session")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write user session to {:?}", path))?;

        log::info!("Saved user session to {:?}", path);
        Ok(())
    }

    /// Load from the default location
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::session_path())
    }

    /// Returns `None` if the file doesn't exist or is empty, an error if it
    /// exists but is corrupt.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read user session from {:?}", path))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse user session from {:?}", path))?;

        let mut session = Self::new();
        session.sign_in(stored.token, stored.user);
        log::info!("Loaded user session from {:?}", path);
        Ok(Some(session))
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Decide whether `path` may be shown, in order: white-listed paths always
/// pass, anonymous users go to the login page, `/` goes home, and paths no
/// route matches exactly go to the not-found page.
pub fn guard(
    session: &AuthSession,
    config: &Config,
    routes: &[RouteNode],
    path: &str,
) -> GuardDecision {
    if config.is_white_listed(path) {
        return GuardDecision::Allow;
    }
    if !session.is_authenticated() {
        log::debug!("Anonymous access to {}, redirecting to login", path);
        return GuardDecision::Redirect(config.login_path.clone());
    }
    if path == "/" {
        return GuardDecision::Redirect(config.home_path.clone());
    }
    if path != config.home_path && find_exact(routes, path).is_none() {
        log::debug!("No route for {}", path);
        return GuardDecision::Redirect(config.not_found_path.clone());
    }
    GuardDecision::Allow
}
