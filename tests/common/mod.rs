//! Shared integration test helpers for navdeck.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{sample_tree, signed_in};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use navdeck::router::{LazyResolver, PageRegistry};
use navdeck::{AuthSession, Config, PermissionTree, RecordingNavigator, UserInfo, Workspace};
use std::sync::Arc;
use tempfile::TempDir;

/// Server-shaped permission forest:
///
/// ```text
/// dashboard         /dashboard            directory
///   workbench       /dashboard/workbench  menu
///   analysis        /dashboard/analysis   menu
/// management        /management           directory
///   system          /management/system    directory
///     user          /management/system/user   menu (component)
///     role          /management/system/role   menu (hidden)
///   reports         /management/reports/index menu
/// ```
pub const SAMPLE_TREE_JSON: &str = r#"[
  { "id": "dashboard", "parentId": null, "name": "Dashboard", "path": "/dashboard",
    "type": "directory", "icon": "ic-analysis", "order": 1,
    "children": [
      { "id": "workbench", "parentId": "dashboard", "name": "Workbench",
        "path": "/dashboard/workbench", "type": "menu",
        "component": "/dashboard/workbench/index" },
      { "id": "analysis", "parentId": "dashboard", "name": "Analysis",
        "path": "/dashboard/analysis", "type": "menu",
        "component": "/dashboard/analysis/index" }
    ] },
  { "id": "management", "parentId": null, "name": "Management", "path": "/management",
    "type": "directory", "order": 2,
    "children": [
      { "id": "system", "parentId": "management", "name": "System",
        "path": "/management/system", "type": "directory",
        "children": [
          { "id": "user", "parentId": "system", "name": "User",
            "path": "/management/system/user", "type": "menu",
            "component": "/management/system/user/index" },
          { "id": "role", "parentId": "system", "name": "Role",
            "path": "/management/system/role", "type": "menu", "hide": true,
            "component": "/management/system/role/index", "children": null }
        ] },
      { "id": "reports", "parentId": "management", "name": "",
        "path": "/management/reports/index", "type": "menu" }
    ] }
]"#;

pub fn sample_tree() -> PermissionTree {
    PermissionTree::from_json(SAMPLE_TREE_JSON).expect("sample tree parses")
}

/// A signed-in session carrying the sample forest.
pub fn signed_in() -> AuthSession {
    let mut auth = AuthSession::new();
    auth.sign_in(
        "test-token",
        UserInfo {
            id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            avatar: None,
            permissions: sample_tree().roots().to_vec(),
        },
    );
    auth
}

/// Registry with a ready page for every menu route of the sample forest.
pub fn sample_registry() -> PageRegistry<String> {
    let mut registry = PageRegistry::new();
    for id in [
        "/dashboard/workbench/index",
        "/dashboard/analysis/index",
        "/management/system/user/index",
        "/management/system/role/index",
    ] {
        registry.register_ready(id, format!("page:{id}"));
    }
    registry
}

/// Workspace over the sample forest with default config.
pub fn sample_workspace() -> Workspace<String, RecordingNavigator> {
    workspace_with(Config::default())
}

pub fn workspace_with(config: Config) -> Workspace<String, RecordingNavigator> {
    Workspace::new(
        config,
        signed_in(),
        Arc::new(LazyResolver::new(sample_registry())),
        RecordingNavigator::new(),
    )
    .expect("sample tree is valid")
}

/// Temporary directory for save/load tests. Keep it alive until all file
/// I/O has completed.
pub fn tmp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
