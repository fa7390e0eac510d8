//! Tab session for keeping the open-tabs strip in step with navigation

use super::title::TitleResolver;
use super::{Tab, TabKey};
use crate::router::{RouteNode, match_routes};
use crate::traits::Navigator;
use navdeck_config::Config;
use std::collections::HashSet;

/// Ordered, path-deduplicated tabs of one authenticated session.
///
/// Invariants held by every operation:
/// - at most one tab per path, insertion order is visit order
/// - never empty; the home tab is seeded on construction
/// - `active_key` always names an existing tab
pub struct TabSession {
    /// All tabs, in visit order
    tabs: Vec<Tab>,
    /// Key of the tab currently shown
    active_key: TabKey,
    /// Keys whose rendered page is currently retained
    retained: HashSet<TabKey>,
    titles: TitleResolver,
    cache_by_default: bool,
}

impl TabSession {
    /// Create a session seeded with the permanent home tab, active.
    pub fn new(config: &Config) -> Self {
        Self::with_titles(TitleResolver::from_config(config), config.cache_tabs_by_default)
    }

    pub fn with_titles(titles: TitleResolver, cache_by_default: bool) -> Self {
        let home = Tab::new(titles.home_path(), titles.home_label(), false);
        let active_key = home.key.clone();
        log::info!("Tab session started with home tab {}", home.path);
        Self {
            tabs: vec![home],
            retained: HashSet::from([active_key.clone()]),
            active_key,
            titles,
            cache_by_default,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key == key)
    }

    /// Make `key` active and drop retained pages of inactive, uncached tabs.
    fn activate(&mut self, key: &str) {
        self.active_key = key.to_string();
        let inactive_uncached: Vec<TabKey> = self
            .tabs
            .iter()
            .filter(|t| t.key != key && !t.cached)
            .map(|t| t.key.clone())
            .collect();
        for stale in inactive_uncached {
            if self.retained.remove(&stale) {
                log::debug!("Released page of uncached tab {}", stale);
            }
        }
        self.retained.insert(key.to_string());
    }

    /// Sync with a committed navigation to `path`.
    ///
    /// An existing tab for the path is activated in place; otherwise a new
    /// tab titled through the fallback chain is appended and activated.
    /// Repeating the same navigation changes nothing.
    pub fn on_navigate(&mut self, path: &str, routes: &[RouteNode]) {
        if self.position(path).is_some() {
            if self.active_key != path {
                log::debug!("Activated existing tab {}", path);
            }
            self.activate(path);
            return;
        }

        let matches = match_routes(routes, path);
        let route_title = matches
            .last()
            .and_then(|m| m.route.meta.title.as_deref());
        let label = self.titles.resolve(path, route_title);
        let tab = Tab::new(path, label, path != self.titles.home_path())
            .with_cached(self.cache_by_default);

        log::info!(
            "Opened tab {} '{}' (total: {})",
            tab.path,
            tab.label,
            self.tabs.len() + 1
        );
        self.tabs.push(tab);
        self.activate(path);
    }

    /// Open `tab` programmatically.
    ///
    /// If a tab with the same path exists only the active key changes; the
    /// existing entry, including its `cached` flag, is kept as is.
    pub fn add_tab(&mut self, mut tab: Tab) {
        if let Some(idx) = self.tabs.iter().position(|t| t.path == tab.path) {
            let key = self.tabs[idx].key.clone();
            self.activate(&key);
            return;
        }
        tab.key = tab.path.clone();
        let key = tab.key.clone();
        log::info!("Added tab {} (total: {})", key, self.tabs.len() + 1);
        self.tabs.push(tab);
        self.activate(&key);
    }

    /// Close the tab `key`.
    ///
    /// Refused when only one tab is open. When the closed tab was active,
    /// the previous tab (or the new first tab if the first was closed)
    /// becomes active and the navigator is sent there.
    pub fn remove_tab(&mut self, key: &str, navigator: &mut dyn Navigator) {
        if self.tabs.len() == 1 {
            log::debug!("Refusing to close the last tab {}", key);
            return;
        }
        let Some(idx) = self.position(key) else {
            return;
        };

        log::info!("Closing tab {} (index {})", key, idx);
        let removed = self.tabs.remove(idx);
        self.retained.remove(&removed.key);

        if removed.key == self.active_key {
            let next_idx = if idx == 0 { 0 } else { idx - 1 };
            let next = self.tabs[next_idx].clone();
            self.activate(&next.key);
            navigator.navigate(&next.path);
        }
    }

    /// Keep only `key` and the non-closable tabs; `key` becomes active.
    pub fn remove_others(&mut self, key: &str, navigator: &mut dyn Navigator) {
        let Some(idx) = self.position(key) else {
            return;
        };
        let target = self.tabs[idx].clone();

        let before = self.tabs.len();
        self.tabs.retain(|t| !t.closable || t.key == key);
        let kept: HashSet<&str> = self.tabs.iter().map(|t| t.key.as_str()).collect();
        self.retained.retain(|k| kept.contains(k.as_str()));
        log::info!(
            "Closed {} tabs other than {}",
            before - self.tabs.len(),
            key
        );

        self.activate(&target.key);
        navigator.navigate(&target.path);
    }

    /// Close everything except the first permanent tab.
    ///
    /// With no permanent tab, the first tab is kept and promoted to
    /// permanent so the strip can never be emptied.
    pub fn remove_all(&mut self, navigator: &mut dyn Navigator) {
        let keep = match self.tabs.iter().find(|t| !t.closable) {
            Some(permanent) => permanent.clone(),
            None => match self.tabs.first() {
                Some(first) => {
                    log::warn!("No permanent tab; promoting {} to permanent", first.key);
                    Tab {
                        closable: false,
                        ..first.clone()
                    }
                }
                None => return,
            },
        };

        log::info!("Closing all tabs except {}", keep.key);
        self.tabs = vec![keep.clone()];
        self.retained.retain(|k| *k == keep.key);
        self.activate(&keep.key);
        navigator.navigate(&keep.path);
    }

    /// Activate an existing tab by key and navigate to it. Unknown keys are
    /// ignored.
    pub fn set_active_tab(&mut self, key: &str, navigator: &mut dyn Navigator) {
        let Some(idx) = self.position(key) else {
            return;
        };
        let path = self.tabs[idx].path.clone();
        self.activate(key);
        log::debug!("Switched to tab {}", key);
        navigator.navigate(&path);
    }

    /// Move a tab to a specific index (drag-and-drop reordering).
    /// Returns true if the tab was actually moved, false if not found or
    /// already at the target. The active key is unaffected.
    pub fn move_tab_to_index(&mut self, key: &str, target_index: usize) -> bool {
        let Some(current_idx) = self.position(key) else {
            return false;
        };

        let clamped_target = target_index.min(self.tabs.len().saturating_sub(1));
        if clamped_target == current_idx {
            return false;
        }

        let tab = self.tabs.remove(current_idx);
        self.tabs.insert(clamped_target, tab);
        log::debug!(
            "Moved tab {} from index {} to {}",
            key,
            current_idx,
            clamped_target
        );
        true
    }

    /// Change whether `key` keeps its page while inactive. Turning caching
    /// off for an inactive tab releases its page immediately.
    pub fn set_cached(&mut self, key: &str, cached: bool) -> bool {
        let Some(idx) = self.position(key) else {
            return false;
        };
        self.tabs[idx].cached = cached;
        if !cached && key != self.active_key {
            self.retained.remove(key);
        }
        true
    }

    /// Record that the page for `key` has been rendered and is held.
    pub fn mark_rendered(&mut self, key: &str) {
        if self.position(key).is_some() {
            self.retained.insert(key.to_string());
        }
    }

    pub fn is_retained(&self, key: &str) -> bool {
        self.retained.contains(key)
    }

    /// Retained keys in tab order.
    pub fn retained_keys(&self) -> Vec<&str> {
        self.tabs
            .iter()
            .filter(|t| self.retained.contains(&t.key))
            .map(|t| t.key.as_str())
            .collect()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.key == self.active_key)
    }

    pub fn get_tab(&self, key: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.key == key)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.key.as_str()).collect()
    }
}

impl std::fmt::Debug for TabSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabSession")
            .field("tabs", &self.keys())
            .field("active_key", &self.active_key)
            .finish_non_exhaustive()
    }
}

impl Default for TabSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
