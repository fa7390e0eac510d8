//! Text renderings behind each subcommand.

use super::tab_ops::TabOp;
use crate::auth::{AuthSession, UserInfo};
use crate::breadcrumb::build_breadcrumbs;
use crate::menu::{MenuItem, build_menu, default_open_keys, search_menu, visible_menu};
use crate::permission::PermissionTree;
use crate::router::{FlattenedIndex, LazyResolver, PageRegistry, RenderTarget, RouteNode, build_route_tree};
use crate::tab::TitleResolver;
use crate::traits::RecordingNavigator;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use navdeck_config::Config;
use std::fmt::Write;
use std::sync::Arc;

fn write_routes(out: &mut String, routes: &[RouteNode], depth: usize) {
    for route in routes {
        let target = match &route.render_target {
            Some(RenderTarget::Outlet) => "outlet".to_string(),
            Some(RenderTarget::Page(lazy)) => format!("page {lazy}"),
            None => "none".to_string(),
        };
        let _ = writeln!(
            out,
            "{}{}  [{}] {}{}",
            "  ".repeat(depth),
            route.path,
            target,
            route.meta.title.as_deref().unwrap_or("-"),
            if route.meta.hide_menu { " (hidden)" } else { "" }
        );
        write_routes(out, &route.children, depth + 1);
    }
}

/// Indented route tree, one route per line.
pub fn routes(tree: &PermissionTree) -> String {
    let mut out = String::new();
    write_routes(&mut out, &build_route_tree(tree.roots()), 0);
    out
}

/// Flattened index as tab-separated `id parent path name` rows.
pub fn flatten(tree: &PermissionTree) -> String {
    let index = FlattenedIndex::new(tree);
    let mut out = String::new();
    for node in index.iter() {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            node.id,
            node.parent().unwrap_or("-"),
            node.path,
            node.name
        );
    }
    out
}

/// Breadcrumb trail for `path`, home first, the active item starred.
pub fn chain(tree: &PermissionTree, config: &Config, path: &str) -> String {
    let index = FlattenedIndex::new(tree);
    let crumbs = build_breadcrumbs(&index, &TitleResolver::from_config(config), path);
    let mut out = String::new();
    for crumb in &crumbs {
        let _ = writeln!(
            out,
            "{} {} ({})",
            if crumb.active { "*" } else { "-" },
            crumb.title,
            crumb.path
        );
    }
    if crumbs.len() == 1 && path != config.home_path {
        let _ = writeln!(out, "no permission node for {path}");
    }
    out
}

fn write_menu(out: &mut String, items: &[MenuItem], open: &[String], depth: usize) {
    for item in items {
        let marker = match &item.children {
            None => " ",
            Some(_) if open.contains(&item.key) => "v",
            Some(_) => ">",
        };
        let _ = writeln!(
            out,
            "{}{} {} ({}){}",
            "  ".repeat(depth),
            marker,
            item.label,
            item.key,
            if item.hidden { " (hidden)" } else { "" }
        );
        if let Some(children) = &item.children {
            write_menu(out, children, open, depth + 1);
        }
    }
}

/// Menu tree with submenus on `path` marked open.
pub fn menu(tree: &PermissionTree, path: Option<&str>, all: bool, json: bool) -> Result<String> {
    let full = build_menu(tree.roots());
    let items = if all { full } else { visible_menu(&full) };
    let open = path.map(default_open_keys).unwrap_or_default();

    if json {
        let mut out = serde_json::to_string_pretty(&serde_json::json!({
            "items": items,
            "openKeys": open,
        }))
        .context("Failed to serialize menu")?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    write_menu(&mut out, &items, &open, 0);
    Ok(out)
}

/// Matching menu entries, one `label (path)` per line.
pub fn search(tree: &PermissionTree, query: &str) -> String {
    let index = FlattenedIndex::new(tree);
    let mut out = String::new();
    for item in search_menu(&index, query) {
        let _ = writeln!(out, "{} ({})", item.label, item.key);
    }
    out
}

/// Replay `ops` against a fresh workspace and print the tab strip plus the
/// navigation requests issued along the way.
pub fn tabs(tree: PermissionTree, config: Config, ops: &[TabOp]) -> Result<String> {
    let mut auth = AuthSession::new();
    auth.sign_in(
        "cli",
        UserInfo {
            id: "cli".to_string(),
            username: "cli".to_string(),
            permissions: tree.roots().to_vec(),
            ..Default::default()
        },
    );

    let resolver = Arc::new(LazyResolver::<()>::new(PageRegistry::new()));
    let mut workspace = Workspace::new(config, auth, resolver, RecordingNavigator::new())
        .context("Permission tree failed validation")?;

    for op in ops {
        log::debug!("Applying {op}");
        match op {
            TabOp::Visit(path) => {
                workspace.navigate(path);
            }
            TabOp::Close(key) => workspace.close_tab(key),
            TabOp::Others(key) => workspace.close_other_tabs(key),
            TabOp::All => workspace.close_all_tabs(),
            TabOp::Activate(key) => workspace.activate_tab(key),
            TabOp::Move(key, index) => {
                workspace.move_tab(key, *index);
            }
        }
    }

    let mut out = String::from("tabs:\n");
    let session = workspace.tabs();
    for tab in session.tabs() {
        let _ = writeln!(
            out,
            "{} {}  {}{}{}",
            if tab.key == session.active_key() { "*" } else { " " },
            tab.path,
            tab.label,
            if tab.closable { "" } else { " (permanent)" },
            if tab.cached { "" } else { " (uncached)" }
        );
    }
    out.push_str("navigation:\n");
    for path in &workspace.navigator().history {
        let _ = writeln!(out, "  -> {path}");
    }
    Ok(out)
}
