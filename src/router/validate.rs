//! Optional eager validation of permission trees.
//!
//! The router itself is permissive: lookups are first-match-wins and the
//! ancestor walk is cycle-guarded. Callers that prefer to reject malformed
//! server data up front run [`validate_tree`] first.

use super::flatten::FlattenedIndex;
use crate::permission::PermissionNode;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate permission id '{0}'")]
    DuplicateId(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    /// Following `parentId` links from this node revisits a node.
    #[error("parentId cycle through '{0}'")]
    ParentCycle(String),
}

/// Reject duplicate ids, duplicate paths and `parentId` cycles.
///
/// # Errors
///
/// Returns the first problem found in pre-order.
pub fn validate_tree(forest: &[PermissionNode]) -> Result<(), TreeError> {
    let index = FlattenedIndex::from_forest(forest);

    let mut ids = HashSet::new();
    let mut paths = HashSet::new();
    for node in index.iter() {
        if !ids.insert(node.id.as_str()) {
            return Err(TreeError::DuplicateId(node.id.clone()));
        }
        if !paths.insert(node.path.as_str()) {
            return Err(TreeError::DuplicatePath(node.path.clone()));
        }
    }

    for node in index.iter() {
        let mut seen = HashSet::from([node.id.as_str()]);
        let mut cursor = node;
        while let Some(parent) = index.parent_of(cursor) {
            if !seen.insert(parent.id.as_str()) {
                return Err(TreeError::ParentCycle(node.id.clone()));
            }
            cursor = parent;
        }
    }

    Ok(())
}
