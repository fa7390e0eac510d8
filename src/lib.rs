// Library exports for the navigation core and the `navdeck` binary
//
// # Ownership Policy
//
// Nothing in navdeck is process-global except the log bridge. Everything
// derived from a permission forest lives in a `workspace::Workspace` built
// at sign-in and dropped at logout:
//
//   - `PermissionTree`:  shared via `Arc`; a new allocation means "changed".
//   - `LazyResolver`:    shared via `Arc` so prefetch tasks can outlive a
//                        navigation. Its slot map uses `parking_lot::Mutex`
//                        (sync-only, never held across `.await`); each slot
//                        is a `tokio::sync::OnceCell`.
//   - `TabSession`:      owned by the workspace, mutated only through it.

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod auth;
pub mod breadcrumb;
pub mod cli;
pub mod debug;
pub mod menu;
pub mod permission;
pub mod router;
pub mod tab;
pub mod traits;
pub mod workspace;

pub use auth::{AuthSession, GuardDecision, UserInfo, guard};
pub use navdeck_config::{Config, ConfigError, LogLevel};
pub use permission::{MenuType, PermissionNode, PermissionTree};
pub use tab::{Tab, TabKey, TabSession};
pub use traits::{Navigator, RecordingNavigator};
pub use workspace::Workspace;
