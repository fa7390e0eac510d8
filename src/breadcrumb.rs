//! Breadcrumb trail for the current route.

use crate::permission::PermissionNode;
use crate::router::{FlattenedIndex, open_path_chain};
use crate::tab::TitleResolver;
use serde::Serialize;

/// Child entry offered in a breadcrumb's dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbLink {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub title: String,
    pub path: String,
    /// True for the item naming the current path.
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub siblings: Vec<BreadcrumbLink>,
}

impl BreadcrumbItem {
    fn from_node(node: &PermissionNode, current_path: &str) -> Self {
        Self {
            title: node.name.clone(),
            path: node.path.clone(),
            active: node.path == current_path,
            siblings: node
                .children
                .iter()
                .map(|child| BreadcrumbLink {
                    title: child.name.clone(),
                    path: child.path.clone(),
                })
                .collect(),
        }
    }
}

/// Home item followed by the open path chain of `current_path`.
///
/// An unmatched path leaves only the home item.
pub fn build_breadcrumbs(
    index: &FlattenedIndex,
    titles: &TitleResolver,
    current_path: &str,
) -> Vec<BreadcrumbItem> {
    let home = BreadcrumbItem {
        title: titles.home_label().to_string(),
        path: titles.home_path().to_string(),
        active: current_path == titles.home_path(),
        siblings: Vec::new(),
    };
    std::iter::once(home)
        .chain(
            open_path_chain(index, current_path)
                .into_iter()
                .map(|node| BreadcrumbItem::from_node(node, current_path)),
        )
        .collect()
}
