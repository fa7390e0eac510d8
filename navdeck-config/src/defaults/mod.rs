//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, so a partial YAML file always yields a
//! complete configuration.

mod routes;
mod tabs;

// ── Route paths ────────────────────────────────────────────────────────────
pub use routes::{forbidden_path, home_path, login_path, not_found_path, white_list};

// ── Tab strip ──────────────────────────────────────────────────────────────
pub use tabs::{home_label, untitled_label};

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}
