//! Core types and data structures for CountedBTree.
//!
//! This module contains the tree and node definitions and the constants that
//! bound node occupancy.

use crate::compact_arena::CompactArena;

pub use crate::compact_arena::{NodeId, NULL_NODE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest minimum degree a tree accepts.
pub const MIN_DEGREE: usize = 2;

/// Minimum degree used by `with_default_degree` and `Default`.
pub const DEFAULT_DEGREE: usize = 50;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A B-tree multiset: every key carries an occurrence count.
///
/// Inserting a key that is already present increments its count; removing a
/// key decrements the count and only deletes the key once the count reaches
/// zero. Unlike a B+ tree, keys live in internal nodes as well as leaves, and
/// each key appears exactly once in the whole tree.
///
/// # Examples
///
/// ```
/// use counted_btree::CountedBTree;
///
/// let mut tree = CountedBTree::new(2).unwrap();
/// for word in ["the", "lord", "the", "the"] {
///     tree.insert(word);
/// }
///
/// assert_eq!(tree.search(&"the"), Some(3));
/// assert_eq!(tree.search(&"lord"), Some(1));
/// assert_eq!(tree.search(&"moses"), None);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.total_insertions(), 4);
/// ```
///
/// # Degree Guidelines
///
/// - Minimum degree `t` must be at least 2 (enforced)
/// - Non-root nodes hold between `t - 1` and `2t - 1` keys
/// - Higher degree = fewer tree levels but longer in-node scans
#[derive(Debug, Clone)]
pub struct CountedBTree<K> {
    /// Minimum degree `t`.
    pub(crate) degree: usize,
    /// Arena id of the root node.
    pub(crate) root: NodeId,
    /// Storage for every node reachable from `root`.
    pub(crate) arena: CompactArena<Node<K>>,
    /// Number of `insert` calls performed since construction or `clear`.
    pub(crate) total_insertions: u64,
    /// Number of distinct keys currently stored.
    pub(crate) unique_keys: usize,
}

/// A B-tree node. `counts[i]` is the occurrence count of `keys[i]`.
///
/// Internal nodes hold `keys.len() + 1` children; leaves hold none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    /// Strictly increasing keys.
    pub(crate) keys: Vec<K>,
    /// Occurrence counts, parallel to `keys`; every entry is at least 1.
    pub(crate) counts: Vec<usize>,
    /// Child ids, empty for leaves.
    pub(crate) children: Vec<NodeId>,
    pub(crate) leaf: bool,
}

impl<K> Default for Node<K> {
    /// An empty leaf.
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            counts: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }
}
