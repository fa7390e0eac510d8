//! Server-sourced permission nodes.
//!
//! A permission node doubles as a menu entry and a route definition. The
//! forest arrives from the session collaborator after sign-in and is treated
//! as read-only by everything in this crate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Whether a node groups children or resolves to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuType {
    /// Groups children, never resolves to a page of its own
    Directory,
    /// Resolves to a page component
    #[default]
    Menu,
}

/// One node of the permission tree.
///
/// `icon`, `hide` and the animation names are presentation metadata; only
/// the menu model reads `hide`, routing never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PermissionNode {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    pub path: String,
    #[serde(rename = "type", default)]
    pub menu_type: MenuType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub hide: bool,
    // The fields below are carried for round-trips only. Forest order is
    // used as given and every page may open a tab.
    #[serde(default)]
    pub hide_tab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_animation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_animation: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<PermissionNode>,
}

/// The server sends `children: null` for leaves.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<PermissionNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<PermissionNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PermissionNode {
    /// Parent id, treating an empty string the same as an absent parent.
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Component identifier, ignoring blank values.
    pub fn component(&self) -> Option<&str> {
        self.component
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_directory(&self) -> bool {
        self.menu_type == MenuType::Directory
    }
}

/// A shared, immutable permission forest.
///
/// Derived structures are rebuilt when the tree *reference* changes, so two
/// trees compare "unchanged" only when they share the same allocation
/// (see [`PermissionTree::same_as`]).
#[derive(Debug, Clone, Default)]
pub struct PermissionTree {
    roots: Arc<Vec<PermissionNode>>,
}

impl PermissionTree {
    pub fn new(roots: Vec<PermissionNode>) -> Self {
        Self {
            roots: Arc::new(roots),
        }
    }

    /// Parse a forest from the server's JSON shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let roots: Vec<PermissionNode> =
            serde_json::from_str(json).context("Failed to parse permission tree JSON")?;
        Ok(Self::new(roots))
    }

    /// Read a forest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read permission tree from {:?}", path))?;
        let tree = Self::from_json(&contents)
            .with_context(|| format!("Invalid permission tree in {:?}", path))?;
        log::info!(
            "Loaded permission tree ({} nodes) from {:?}",
            tree.node_count(),
            path
        );
        Ok(tree)
    }

    pub fn roots(&self) -> &[PermissionNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count over all levels.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&PermissionNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Whether both handles point at the same forest allocation.
    pub fn same_as(&self, other: &PermissionTree) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }
}

impl From<Vec<PermissionNode>> for PermissionTree {
    fn from(roots: Vec<PermissionNode>) -> Self {
        Self::new(roots)
    }
}
