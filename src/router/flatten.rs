//! Pre-order flattening of the permission forest.

use crate::permission::{PermissionNode, PermissionTree};
use std::collections::HashMap;

/// Pre-order linearization: every node before its children, children in
/// source order. Includes hidden nodes and directories alike.
///
/// Uses an explicit stack so arbitrarily deep trees cannot exhaust the
/// call stack.
pub fn flatten(forest: &[PermissionNode]) -> Vec<&PermissionNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&PermissionNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Flattened forest plus id/path lookup tables.
///
/// Holds its own handle on the [`PermissionTree`], so it can be built once
/// per tree and kept next to it. Each entry is the child-index path from
/// the roots down to a node.
///
/// Lookups are first-match-wins in pre-order, so a duplicate path or id
/// later in the traversal is shadowed by the earlier one.
#[derive(Debug, Clone, Default)]
pub struct FlattenedIndex {
    tree: PermissionTree,
    locators: Vec<Vec<usize>>,
    by_id: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
}

impl FlattenedIndex {
    pub fn new(tree: &PermissionTree) -> Self {
        let mut locators = Vec::with_capacity(tree.node_count());
        let mut by_id = HashMap::with_capacity(locators.capacity());
        let mut by_path = HashMap::with_capacity(locators.capacity());

        let mut stack: Vec<(Vec<usize>, &PermissionNode)> = tree
            .roots()
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (vec![i], node))
            .collect();
        while let Some((locator, node)) = stack.pop() {
            let position = locators.len();
            by_id.entry(node.id.clone()).or_insert(position);
            by_path.entry(node.path.clone()).or_insert(position);
            for (i, child) in node.children.iter().enumerate().rev() {
                let mut child_locator = locator.clone();
                child_locator.push(i);
                stack.push((child_locator, child));
            }
            locators.push(locator);
        }

        log::trace!("Flattened permission forest into {} nodes", locators.len());
        Self {
            tree: tree.clone(),
            locators,
            by_id,
            by_path,
        }
    }

    /// Index a loose forest. The nodes are copied into a fresh tree.
    pub fn from_forest(forest: &[PermissionNode]) -> Self {
        Self::new(&PermissionTree::new(forest.to_vec()))
    }

    /// The tree this index was built from.
    pub fn tree(&self) -> &PermissionTree {
        &self.tree
    }

    /// Whether this index was built from `tree` (same allocation).
    pub fn is_built_from(&self, tree: &PermissionTree) -> bool {
        self.tree.same_as(tree)
    }

    fn node_at(&self, position: usize) -> Option<&PermissionNode> {
        let (first, rest) = self.locators.get(position)?.split_first()?;
        let mut node = self.tree.roots().get(*first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> Vec<&PermissionNode> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&PermissionNode> {
        self.by_id.get(id).and_then(|&position| self.node_at(position))
    }

    pub fn find_by_path(&self, path: &str) -> Option<&PermissionNode> {
        self.by_path.get(path).and_then(|&position| self.node_at(position))
    }

    /// Parent of `node`, looked up through its `parentId` back-reference.
    pub fn parent_of(&self, node: &PermissionNode) -> Option<&PermissionNode> {
        node.parent().and_then(|id| self.find_by_id(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermissionNode> + '_ {
        (0..self.locators.len()).filter_map(|position| self.node_at(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::MenuType;
    use std::collections::HashSet;

    fn node(id: &str, parent: Option<&str>, path: &str, children: Vec<PermissionNode>) -> PermissionNode {
        PermissionNode {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_string(),
            path: path.to_string(),
            menu_type: if children.is_empty() {
                MenuType::Menu
            } else {
                MenuType::Directory
            },
            children,
            ..Default::default()
        }
    }

    fn sample() -> Vec<PermissionNode> {
        vec![
            node(
                "a",
                None,
                "/a",
                vec![
                    node("b", Some("a"), "/a/b", vec![node("c", Some("b"), "/a/b/c", vec![])]),
                    node("d", Some("a"), "/a/d", vec![]),
                ],
            ),
            node("e", None, "/e", vec![]),
        ]
    }

    #[test]
    fn pre_order_parent_before_children() {
        let forest = sample();
        let ids: Vec<&str> = flatten(&forest).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn every_node_appears_exactly_once() {
        let forest = sample();
        let flat = flatten(&forest);
        let unique: HashSet<&str> = flat.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(flat.len(), 5);
        assert_eq!(unique.len(), flat.len());
    }

    #[test]
    fn hidden_nodes_are_flattened() {
        let mut forest = sample();
        forest[1].hide = true;
        assert!(flatten(&forest).iter().any(|n| n.id == "e"));
    }

    #[test]
    fn index_lookups() {
        let forest = sample();
        let index = FlattenedIndex::from_forest(&forest);
        assert_eq!(index.len(), 5);
        assert_eq!(index.find_by_path("/a/b/c").map(|n| n.id.as_str()), Some("c"));
        assert_eq!(index.find_by_id("d").map(|n| n.path.as_str()), Some("/a/d"));
        assert!(index.find_by_path("/missing").is_none());

        let c = index.find_by_id("c").unwrap();
        assert_eq!(index.parent_of(c).map(|n| n.id.as_str()), Some("b"));
    }

    #[test]
    fn duplicate_paths_resolve_to_first_in_pre_order() {
        let forest = vec![
            node("first", None, "/dup", vec![]),
            node("second", None, "/dup", vec![]),
        ];
        let index = FlattenedIndex::from_forest(&forest);
        assert_eq!(index.find_by_path("/dup").map(|n| n.id.as_str()), Some("first"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn index_shares_the_tree_allocation() {
        let tree = PermissionTree::new(sample());
        let index = FlattenedIndex::new(&tree);
        assert!(index.is_built_from(&tree));
        assert!(!index.is_built_from(&PermissionTree::new(sample())));
        let ids: Vec<&str> = index.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn empty_forest() {
        let index = FlattenedIndex::from_forest(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
