//! Ancestor chain of the current route.

use super::flatten::FlattenedIndex;
use crate::permission::PermissionNode;
use std::collections::HashSet;

/// Nodes from the root-most ancestor down to the node whose path equals
/// `current_path`.
///
/// An unmatched path yields an empty chain. The upward walk stops at the
/// first parent id that cannot be resolved, and also when a `parentId` link
/// revisits an id already on the chain, so malformed input terminates.
pub fn open_path_chain<'a>(
    index: &'a FlattenedIndex,
    current_path: &str,
) -> Vec<&'a PermissionNode> {
    let Some(active) = index.find_by_path(current_path) else {
        return Vec::new();
    };

    let mut chain = vec![active];
    let mut visited: HashSet<&str> = HashSet::from([active.id.as_str()]);
    let mut cursor = active;

    while let Some(parent) = index.parent_of(cursor) {
        if !visited.insert(parent.id.as_str()) {
            log::warn!(
                "parentId cycle detected at '{}' while resolving '{}'",
                parent.id,
                current_path
            );
            break;
        }
        chain.push(parent);
        cursor = parent;
    }

    chain.reverse();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, path: &str) -> PermissionNode {
        PermissionNode {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    fn ids<'a>(chain: &[&'a PermissionNode]) -> Vec<&'a str> {
        chain.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn chain_runs_root_to_current() {
        let mut a = node("A", None, "/a");
        let mut b = node("B", Some("A"), "/a/b");
        b.children.push(node("C", Some("B"), "/a/b/c"));
        a.children.push(b);
        let forest = vec![a];
        let index = FlattenedIndex::from_forest(&forest);

        assert_eq!(ids(&open_path_chain(&index, "/a/b/c")), vec!["A", "B", "C"]);
        assert_eq!(ids(&open_path_chain(&index, "/a")), vec!["A"]);
    }

    #[test]
    fn unmatched_path_is_empty() {
        let forest = vec![node("A", None, "/a")];
        let index = FlattenedIndex::from_forest(&forest);
        assert!(open_path_chain(&index, "/nowhere").is_empty());
    }

    #[test]
    fn dangling_parent_stops_the_walk() {
        let forest = vec![node("orphan", Some("ghost"), "/orphan")];
        let index = FlattenedIndex::from_forest(&forest);
        assert_eq!(ids(&open_path_chain(&index, "/orphan")), vec!["orphan"]);
    }

    #[test]
    fn parent_cycle_terminates() {
        // X and Y point at each other through parentId.
        let forest = vec![node("X", Some("Y"), "/x"), node("Y", Some("X"), "/y")];
        let index = FlattenedIndex::from_forest(&forest);
        assert_eq!(ids(&open_path_chain(&index, "/x")), vec!["Y", "X"]);
    }

    #[test]
    fn self_parent_terminates() {
        let forest = vec![node("S", Some("S"), "/s")];
        let index = FlattenedIndex::from_forest(&forest);
        assert_eq!(ids(&open_path_chain(&index, "/s")), vec!["S"]);
    }
}
