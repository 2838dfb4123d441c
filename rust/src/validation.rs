//! Validation and debugging utilities for CountedBTree.
//!
//! This module contains invariant checking, debugging helpers and the
//! checked variants of the mutating operations.

use crate::error::{BTreeResult, CountedTreeError, ModifyResult, TreeResult};
use crate::types::{CountedBTree, NodeId};

/// Facts gathered while walking the tree for validation.
#[derive(Default)]
struct WalkSummary {
    nodes: usize,
    keys: usize,
    leaf_depth: Option<usize>,
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord> CountedBTree<K> {
    /// Check if the tree maintains all B-tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        let mut summary = WalkSummary::default();
        self.check_node_invariants(self.root, None, None, 1, &mut summary)
            .map_err(|e| e.to_string())?;

        if summary.keys != self.unique_keys {
            return Err(format!(
                "Tree holds {} distinct keys but counter says {}",
                summary.keys, self.unique_keys
            ));
        }

        self.check_arena_tree_consistency(summary.nodes)
            .map_err(|e| e.to_string())
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> Result<(), String> {
        self.check_invariants_detailed()
    }

    /// Check that arena allocation matches tree structure
    fn check_arena_tree_consistency(&self, reachable_nodes: usize) -> TreeResult<()> {
        let stats = self.arena.stats();
        if reachable_nodes != stats.allocated_count {
            return Err(CountedTreeError::arena_error(
                "Node consistency check",
                &format!(
                    "{} in tree vs {} in arena",
                    reachable_nodes, stats.allocated_count
                ),
            ));
        }
        Ok(())
    }

    /// Recursively check invariants for a node and its children.
    ///
    /// Keys must lie strictly between `min_key` and `max_key`, inherited from
    /// the separators above.
    fn check_node_invariants(
        &self,
        node_id: NodeId,
        min_key: Option<&K>,
        max_key: Option<&K>,
        depth: usize,
        summary: &mut WalkSummary,
    ) -> TreeResult<()> {
        let node = self.arena.get(node_id).ok_or_else(|| {
            CountedTreeError::corrupted_tree("Node", &format!("id {} is not allocated", node_id))
        })?;
        let is_root = node_id == self.root;
        summary.nodes += 1;
        summary.keys += node.keys.len();

        if node.keys.len() != node.counts.len() {
            return Err(CountedTreeError::data_integrity(
                &format!("node {}", node_id),
                &format!("{} keys but {} counts", node.keys.len(), node.counts.len()),
            ));
        }

        if node.counts.iter().any(|&count| count == 0) {
            return Err(CountedTreeError::data_integrity(
                &format!("node {}", node_id),
                "zero occurrence count",
            ));
        }

        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(CountedTreeError::data_integrity(
                &format!("node {}", node_id),
                "keys are not strictly ascending",
            ));
        }

        let max_keys = 2 * self.degree - 1;
        if node.keys.len() > max_keys {
            return Err(CountedTreeError::data_integrity(
                &format!("node {}", node_id),
                &format!("{} keys exceeds maximum {}", node.keys.len(), max_keys),
            ));
        }
        if !is_root && node.keys.len() < self.degree - 1 {
            return Err(CountedTreeError::data_integrity(
                &format!("node {}", node_id),
                &format!("{} keys is below minimum {}", node.keys.len(), self.degree - 1),
            ));
        }

        if let (Some(min), Some(first)) = (min_key, node.keys.first()) {
            if first <= min {
                return Err(CountedTreeError::data_integrity(
                    &format!("node {}", node_id),
                    "first key not above parent separator",
                ));
            }
        }
        if let (Some(max), Some(last)) = (max_key, node.keys.last()) {
            if last >= max {
                return Err(CountedTreeError::data_integrity(
                    &format!("node {}", node_id),
                    "last key not below parent separator",
                ));
            }
        }

        if node.leaf {
            if !node.children.is_empty() {
                return Err(CountedTreeError::data_integrity(
                    &format!("leaf {}", node_id),
                    "leaf has children",
                ));
            }
            return match summary.leaf_depth {
                None => {
                    summary.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(CountedTreeError::corrupted_tree(
                    "Leaf depth",
                    &format!("leaf {} at depth {} but others at {}", node_id, depth, expected),
                )),
            };
        }

        if node.children.len() != node.keys.len() + 1 {
            return Err(CountedTreeError::data_integrity(
                &format!("internal {}", node_id),
                &format!(
                    "{} keys but {} children",
                    node.keys.len(),
                    node.children.len()
                ),
            ));
        }
        if is_root && node.keys.is_empty() {
            return Err(CountedTreeError::data_integrity(
                "root",
                "internal root without keys",
            ));
        }

        for (i, &child) in node.children.iter().enumerate() {
            let child_min = if i == 0 { min_key } else { Some(&node.keys[i - 1]) };
            let child_max = if i == node.keys.len() {
                max_key
            } else {
                Some(&node.keys[i])
            };
            self.check_node_invariants(child, child_min, child_max, depth + 1, summary)?;
        }

        Ok(())
    }

    // ============================================================================
    // DEBUGGING AND TESTING UTILITIES
    // ============================================================================

    /// Returns the depth of every leaf, left to right (for testing/debugging).
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::new();
        self.collect_leaf_depths(self.root, 1, &mut depths);
        depths
    }

    fn collect_leaf_depths(&self, node_id: NodeId, depth: usize, depths: &mut Vec<usize>) {
        let node = &self.arena[node_id];
        if node.leaf {
            depths.push(depth);
        } else {
            for &child in &node.children {
                self.collect_leaf_depths(child, depth + 1, depths);
            }
        }
    }

    /// Prints the node structure for debugging.
    pub fn print_node_chain(&self)
    where
        K: std::fmt::Debug,
    {
        println!("Tree structure:");
        self.print_node(self.root, 0);
    }

    /// Print a node and its children recursively for debugging.
    fn print_node(&self, node_id: NodeId, depth: usize)
    where
        K: std::fmt::Debug,
    {
        let indent = "  ".repeat(depth);
        match self.arena.get(node_id) {
            Some(node) if node.leaf => {
                println!("{}Leaf[id={}]: {:?} counts={:?}", indent, node_id, node.keys, node.counts);
            }
            Some(node) => {
                println!(
                    "{}Internal[id={}]: {:?} counts={:?}, {} children",
                    indent,
                    node_id,
                    node.keys,
                    node.counts,
                    node.children.len()
                );
                for &child in &node.children {
                    self.print_node(child, depth + 1);
                }
            }
            None => println!("{}Node[id={}]: <missing>", indent, node_id),
        }
    }

    // ============================================================================
    // CHECKED OPERATIONS
    // ============================================================================

    /// Check if tree is in a valid state for operations
    pub fn validate_for_operation(&self, operation: &str) -> BTreeResult<()> {
        self.check_invariants_detailed()
            .map_err(|e| CountedTreeError::data_integrity(operation, &e))
    }

    /// Insert with invariant validation before and after the mutation.
    pub fn try_insert(&mut self, key: K) -> ModifyResult<bool> {
        self.validate_for_operation("insert")?;
        let is_new = self.insert(key);
        self.validate_for_operation("insert")?;
        Ok(is_new)
    }

    /// Remove with invariant validation before and after the mutation.
    pub fn try_remove(&mut self, key: &K) -> ModifyResult<bool> {
        self.validate_for_operation("remove")?;
        let removed = self.remove(key);
        self.validate_for_operation("remove")?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;

    #[test]
    fn test_valid_tree_passes() {
        let mut tree = CountedBTree::new(3).unwrap();
        for i in 0..500 {
            tree.insert(i * 7 % 311);
        }
        assert_eq!(tree.validate(), Ok(()));
        let depths = tree.leaf_depths();
        assert!(depths.iter().all(|&d| d == tree.height()));
    }

    #[test]
    fn test_detects_unsorted_keys() {
        let mut tree = CountedBTree::new(2).unwrap();
        for i in 0..3 {
            tree.insert(i);
        }
        let root = tree.root;
        tree.arena[root].keys.swap(0, 2);
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("strictly ascending"), "{}", err);
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = CountedBTree::new(3).unwrap();
        for i in 0..6 {
            tree.insert(i);
        }
        // root [2] over [0, 1] [3, 4, 5]
        let left = tree.arena[tree.root].children[0];
        tree.arena[left].keys.pop();
        tree.arena[left].counts.pop();
        tree.unique_keys -= 1;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("below minimum"), "{}", err);
    }

    #[test]
    fn test_detects_leaked_node() {
        let mut tree = CountedBTree::<i32>::new(2).unwrap();
        tree.arena.allocate(Node::new_leaf(2));
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("Arena error"), "{}", err);
    }

    #[test]
    fn test_detects_counter_drift() {
        let mut tree = CountedBTree::new(2).unwrap();
        tree.insert(1);
        tree.unique_keys = 5;
        assert!(!tree.check_invariants());
        assert!(tree.try_insert(2).is_err());
    }

    #[test]
    fn test_checked_operations() {
        let mut tree = CountedBTree::new(2).unwrap();
        assert_eq!(tree.try_insert(4), Ok(true));
        assert_eq!(tree.try_insert(4), Ok(false));
        assert_eq!(tree.try_remove(&4), Ok(true));
        assert_eq!(tree.try_remove(&9), Ok(false));
    }
}
