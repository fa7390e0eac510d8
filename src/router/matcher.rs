//! Nested route matching.
//!
//! A route matches a pathname exactly, or as a segment-aligned prefix. Every
//! matching route is recorded in visit order and its children are searched
//! with the route's full path as their base, so the last entry is the most
//! specific match.

use super::route_tree::RouteNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteNode,
    /// Full path the route matched under.
    pub url: String,
    pub is_exact: bool,
}

/// Full path of `child` below `parent`. Absolute child paths stand alone.
pub fn join_route_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

fn is_prefix_match(pathname: &str, full: &str) -> bool {
    if full.is_empty() || !pathname.starts_with(full) {
        return false;
    }
    full.ends_with('/') || pathname[full.len()..].starts_with('/')
}

/// All routes matching `pathname`, outermost first. Empty when nothing matches.
pub fn match_routes<'a>(routes: &'a [RouteNode], pathname: &str) -> Vec<RouteMatch<'a>> {
    let mut matches = Vec::new();
    collect_matches(routes, pathname, "", &mut matches);
    matches
}

fn collect_matches<'a>(
    routes: &'a [RouteNode],
    pathname: &str,
    parent: &str,
    out: &mut Vec<RouteMatch<'a>>,
) {
    for route in routes {
        let full = join_route_path(parent, &route.path);
        let is_exact = pathname == full;
        if is_exact || is_prefix_match(pathname, &full) {
            out.push(RouteMatch {
                route,
                url: full.clone(),
                is_exact,
            });
            collect_matches(&route.children, pathname, &full, out);
        }
    }
}

/// The route whose full path equals `pathname`, if any.
pub fn find_exact<'a>(routes: &'a [RouteNode], pathname: &str) -> Option<&'a RouteNode> {
    match_routes(routes, pathname)
        .into_iter()
        .find(|m| m.is_exact)
        .map(|m| m.route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route_tree::RouteMeta;

    fn route(path: &str, title: &str, children: Vec<RouteNode>) -> RouteNode {
        RouteNode {
            path: path.to_string(),
            render_target: None,
            meta: RouteMeta {
                title: Some(title.to_string()),
                ..Default::default()
            },
            children,
        }
    }

    fn titles(matches: &[RouteMatch<'_>]) -> Vec<String> {
        matches
            .iter()
            .map(|m| m.route.meta.title.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn join_paths() {
        assert_eq!(join_route_path("/system", "user"), "/system/user");
        assert_eq!(join_route_path("/system/", "user"), "/system/user");
        assert_eq!(join_route_path("/system", "/system/user"), "/system/user");
        assert_eq!(join_route_path("", "user"), "user");
        assert_eq!(join_route_path("/system", ""), "/system");
    }

    #[test]
    fn absolute_children_match_outermost_first() {
        let routes = vec![route(
            "/system",
            "System",
            vec![route("/system/user", "User", vec![])],
        )];
        let matches = match_routes(&routes, "/system/user");
        assert_eq!(titles(&matches), vec!["System", "User"]);
        assert!(!matches[0].is_exact);
        assert!(matches[1].is_exact);
        assert_eq!(matches[1].url, "/system/user");
    }

    #[test]
    fn relative_children_are_joined() {
        let routes = vec![route("/system", "System", vec![route("role", "Role", vec![])])];
        let matches = match_routes(&routes, "/system/role");
        assert_eq!(titles(&matches), vec!["System", "Role"]);
        assert_eq!(
            find_exact(&routes, "/system/role").and_then(|r| r.meta.title.as_deref()),
            Some("Role")
        );
    }

    #[test]
    fn prefix_must_align_with_segments() {
        let routes = vec![route("/sys", "Sys", vec![])];
        assert!(match_routes(&routes, "/system").is_empty());
        assert_eq!(match_routes(&routes, "/sys/detail").len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        let routes = vec![route("/a", "A", vec![])];
        assert!(match_routes(&routes, "/b").is_empty());
        assert!(find_exact(&routes, "/b").is_none());
    }
}
