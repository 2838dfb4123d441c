//! Counted B-tree in Rust.
//!
//! This crate provides a B-tree multiset: each distinct key is stored once
//! together with an occurrence count. Inserting a present key increments its
//! count, removing decrements it, and a key disappears once its count reaches
//! zero. The tree rebalances by splitting on the way down during insertion and
//! by borrowing from or merging siblings on the way down during deletion.
//!
//! ```
//! use counted_btree::CountedBTree;
//!
//! let mut tree = CountedBTree::new(2).unwrap();
//! for word in "in the beginning god created the heaven and the earth".split(' ') {
//!     tree.insert(word);
//! }
//! assert_eq!(tree.search(&"the"), Some(3));
//! assert_eq!(tree.len(), 8);
//! assert!(tree.check_invariants());
//! ```

mod compact_arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod stats;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use construction::validation::{recommended_degree, validate_degree};
pub use error::{BTreeResult, CountedTreeError, InitResult, ModifyResult};
pub use iteration::{ItemIterator, KeyIterator};
pub use node::SplitNodeData;
pub use stats::TreeStats;
pub use types::{CountedBTree, Node, NodeId, DEFAULT_DEGREE, MIN_DEGREE, NULL_NODE};

impl<K> CountedBTree<K> {
    // ============================================================================
    // OTHER API OPERATIONS
    // ============================================================================

    /// Returns the number of distinct keys in the tree.
    pub fn len(&self) -> usize {
        self.unique_keys
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.unique_keys == 0
    }

    /// Returns the minimum degree `t` the tree was built with.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of `insert` calls since construction or the last `clear`.
    pub fn total_insertions(&self) -> u64 {
        self.total_insertions
    }

    /// Sum of the counts of every stored key.
    pub fn total_count(&self) -> usize {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Number of node levels; a tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.arena[self.root];
        while !node.leaf {
            node = &self.arena[node.children[0]];
            height += 1;
        }
        height
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.arena[self.root].leaf
    }

    /// Number of nodes currently in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Get statistics for the node arena.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.arena.stats()
    }
}

impl<K: Ord> Extend<K> for CountedBTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for CountedBTree<K> {
    /// Build a tree of default degree from a stream of keys.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::with_default_degree();
        tree.extend(iter);
        tree
    }
}
