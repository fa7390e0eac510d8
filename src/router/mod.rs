//! Permission tree router.
//!
//! Turns the server's permission forest into a route tree plus the derived
//! read views the rest of the crate consumes:
//!
//! - [`build_route_tree`]: structure-preserving permission → route transform
//! - [`flatten`] / [`FlattenedIndex`]: pre-order index for id/path lookup
//! - [`open_path_chain`]: root-to-current ancestor chain for breadcrumbs
//! - [`match_routes`]: nested route matching used for tab titles and the guard
//! - [`LazyResolver`]: memoized, at-most-once page resolution

pub mod flatten;
pub mod lazy;
pub mod matcher;
pub mod open_path;
pub mod route_tree;
pub mod validate;

pub use flatten::{FlattenedIndex, flatten};
pub use lazy::{LazyResolver, PageFactory, PageFuture, PageRegistry, ResolveError};
pub use matcher::{RouteMatch, find_exact, join_route_path, match_routes};
pub use open_path::open_path_chain;
pub use route_tree::{LazyRef, RenderTarget, RouteMeta, RouteNode, build_route_tree, lazy_refs};
pub use validate::{TreeError, validate_tree};
