//! Permission forest → route forest transform.

use crate::permission::{MenuType, PermissionNode};
use std::fmt;

/// Deferred handle to a page implementation.
///
/// Building a route tree only records the identifier; the page itself is
/// resolved on first navigation through [`super::LazyResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LazyRef {
    identifier: String,
}

impl LazyRef {
    /// Normalizes the identifier to a rooted path-like key (`system/user` and
    /// `/system/user` name the same page).
    pub fn new(identifier: &str) -> Self {
        let trimmed = identifier.trim().trim_end_matches('/');
        let identifier = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self { identifier }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for LazyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// What a route renders when it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Pass-through container; the matched child route supplies the content.
    Outlet,
    /// A lazily resolved page.
    Page(LazyRef),
}

/// Route metadata consulted by the tab title fallback chain and the menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub menu_type: MenuType,
    pub hide_menu: bool,
}

/// Route-library-facing node. Same shape as the permission node it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode {
    pub path: String,
    pub render_target: Option<RenderTarget>,
    pub meta: RouteMeta,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// The page reference, if this route resolves to one.
    pub fn lazy_ref(&self) -> Option<&LazyRef> {
        match &self.render_target {
            Some(RenderTarget::Page(lazy)) => Some(lazy),
            _ => None,
        }
    }

    /// Number of routes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(RouteNode::subtree_len).sum::<usize>()
    }
}

/// Collect every lazy page reference in a route forest, pre-order.
pub fn lazy_refs(routes: &[RouteNode]) -> Vec<&LazyRef> {
    let mut out = Vec::new();
    let mut stack: Vec<&RouteNode> = routes.iter().rev().collect();
    while let Some(route) = stack.pop() {
        if let Some(lazy) = route.lazy_ref() {
            out.push(lazy);
        }
        stack.extend(route.children.iter().rev());
    }
    out
}

/// Transform a permission forest into a route forest.
///
/// Hidden nodes are kept: `hide` only affects the menu, every node stays
/// routable by URL. The output depends on nothing but the input.
pub fn build_route_tree(forest: &[PermissionNode]) -> Vec<RouteNode> {
    forest.iter().map(permission_to_route).collect()
}

fn permission_to_route(node: &PermissionNode) -> RouteNode {
    let render_target = if node.is_directory() && node.has_children() {
        Some(RenderTarget::Outlet)
    } else if let Some(component) = node.component() {
        Some(RenderTarget::Page(LazyRef::new(component)))
    } else if !node.path.trim().is_empty() {
        Some(RenderTarget::Page(LazyRef::new(&node.path)))
    } else {
        None
    };

    RouteNode {
        path: node.path.clone(),
        render_target,
        meta: RouteMeta {
            title: Some(node.name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            menu_type: node.menu_type,
            hide_menu: node.hide,
        },
        children: node.children.iter().map(permission_to_route).collect(),
    }
}
