//! Multi-tab session model
//!
//! This module provides the open-tabs infrastructure:
//! - `Tab`: one visited route in the tab strip
//! - `TabSession`: ordered, path-deduplicated tabs plus the active key
//! - `TitleResolver`: display titles for newly opened tabs

mod session;
mod title;

pub use session::TabSession;
pub use title::{TitleResolver, capitalize};

/// Tab identity. Always equal to the tab's route path.
pub type TabKey = String;

/// A single entry in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: TabKey,
    pub label: String,
    pub path: String,
    /// False exactly for the permanent (home) tab.
    pub closable: bool,
    /// Keep the rendered page alive while the tab is inactive.
    pub cached: bool,
}

impl Tab {
    /// Create a tab keyed by its path.
    pub fn new(path: impl Into<String>, label: impl Into<String>, closable: bool) -> Self {
        let path = path.into();
        Self {
            key: path.clone(),
            label: label.into(),
            path,
            closable,
            cached: true,
        }
    }

    /// Builder-style override of the `cached` flag.
    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }
}
