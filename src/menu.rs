//! Navigation menu model derived from the permission forest.

use crate::permission::PermissionNode;
use crate::router::FlattenedIndex;
use serde::Serialize;

/// One entry of the side navigation menu, keyed by route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub hidden: bool,
    /// `None` for leaves, never an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Build the menu with the same shape as `forest`, hidden items included.
pub fn build_menu(forest: &[PermissionNode]) -> Vec<MenuItem> {
    forest
        .iter()
        .map(|node| MenuItem {
            key: node.path.clone(),
            label: node.name.clone(),
            icon: node.icon.clone().filter(|icon| !icon.is_empty()),
            hidden: node.hide,
            children: node.has_children().then(|| build_menu(&node.children)),
        })
        .collect()
}

/// Drop hidden items, and everything below them.
pub fn visible_menu(items: &[MenuItem]) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| !item.hidden)
        .map(|item| MenuItem {
            children: item
                .children
                .as_deref()
                .map(visible_menu)
                .filter(|children| !children.is_empty()),
            ..item.clone()
        })
        .collect()
}

/// Flat menu search in pre-order. Hidden nodes are skipped but their
/// descendants are still searched. Labels match by case-insensitive
/// substring; an empty query returns every visible node.
pub fn search_menu(index: &FlattenedIndex, query: &str) -> Vec<MenuItem> {
    let needle = query.to_lowercase();
    index
        .iter()
        .filter(|node| !node.hide && node.name.to_lowercase().contains(&needle))
        .map(|node| MenuItem {
            key: node.path.clone(),
            label: node.name.clone(),
            icon: node.icon.clone().filter(|icon| !icon.is_empty()),
            hidden: false,
            children: None,
        })
        .collect()
}

/// Submenus to expand for `path`: every cumulative prefix of its segments.
///
/// `/a/b/c` yields `/a`, `/a/b`, `/a/b/c`.
pub fn default_open_keys(path: &str) -> Vec<String> {
    let mut current = String::new();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            current.push('/');
            current.push_str(segment);
            current.clone()
        })
        .collect()
}
