//! Node-local operations for CountedBTree.
//!
//! Everything here touches a single node (or a node and a detached sibling).
//! Cross-node orchestration lives in `insert_operations` and
//! `delete_operations`, which thread the parent id and child index through
//! the recursion instead of storing parent links.

use crate::types::{Node, NodeId};

/// Upper half of a node after `split_full`, ready to be allocated.
#[derive(Debug)]
pub struct SplitNodeData<K> {
    /// Median key moving up into the parent.
    pub separator_key: K,
    /// Count travelling with the median key.
    pub separator_count: usize,
    /// New right sibling holding the keys above the median.
    pub right: Node<K>,
}

impl<K: Ord> Node<K> {
    // ============================================================================
    // GET OPERATIONS
    // ============================================================================

    /// Binary search for `key`: `Ok(slot)` when present, `Err(child index)` otherwise.
    #[inline]
    pub fn find(&self, key: &K) -> Result<usize, usize> {
        self.keys.binary_search(key)
    }

    /// Count stored for `key` in this node only.
    pub fn count_of(&self, key: &K) -> Option<usize> {
        self.find(key).ok().map(|index| self.counts[index])
    }

    /// Returns the number of keys in this node.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Keys held by this node in ascending order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Counts parallel to `keys()`.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Child ids, empty for a leaf.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Insert `key` with count 1, or bump its count if already present.
    ///
    /// Returns true when a new key was created. Children are not touched, so on
    /// an internal node the caller is responsible for keeping the child count
    /// consistent.
    pub fn insert_or_increment(&mut self, key: K) -> bool {
        match self.find(&key) {
            Ok(index) => {
                self.counts[index] += 1;
                false
            }
            Err(index) => {
                self.keys.insert(index, key);
                self.counts.insert(index, 1);
                true
            }
        }
    }

    /// Place a separator promoted from child `index` together with the new
    /// right sibling that follows it.
    pub(crate) fn insert_separator(&mut self, index: usize, key: K, count: usize, right: NodeId) {
        self.keys.insert(index, key);
        self.counts.insert(index, count);
        self.children.insert(index + 1, right);
    }

    /// Split a node holding exactly `2t - 1` keys.
    ///
    /// Keeps keys `[0, t - 1)` (and children `[0, t)`) in `self`, returns the
    /// median at `t - 1` plus a new sibling of the same kind owning the rest.
    pub fn split_full(&mut self, degree: usize) -> SplitNodeData<K> {
        debug_assert_eq!(self.keys.len(), 2 * degree - 1, "split of a non-full node");
        let mid = degree - 1;

        let right_keys = self.keys.split_off(mid + 1);
        let right_counts = self.counts.split_off(mid + 1);
        let right_children = if self.leaf {
            Vec::new()
        } else {
            self.children.split_off(mid + 1)
        };

        let separator_key = self.keys.remove(mid);
        let separator_count = self.counts.remove(mid);

        SplitNodeData {
            separator_key,
            separator_count,
            right: Node {
                keys: right_keys,
                counts: right_counts,
                children: right_children,
                leaf: self.leaf,
            },
        }
    }

    // ============================================================================
    // DELETE OPERATIONS
    // ============================================================================

    /// Decrement the count of `key`, removing the key when the count hits zero.
    ///
    /// Returns false if the key is not held by this node.
    pub fn decrement_or_remove(&mut self, key: &K) -> bool {
        match self.find(key) {
            Ok(index) => {
                self.decrement_at(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Decrement slot `index`; drop the key if its count reaches zero.
    pub(crate) fn decrement_at(&mut self, index: usize) {
        if self.counts[index] > 1 {
            self.counts[index] -= 1;
        } else {
            self.keys.remove(index);
            self.counts.remove(index);
        }
    }

    /// Remove slot `index` and the child to its right, returning the key and count.
    pub(crate) fn remove_separator(&mut self, index: usize) -> (K, usize, NodeId) {
        let key = self.keys.remove(index);
        let count = self.counts.remove(index);
        let right = self.children.remove(index + 1);
        (key, count, right)
    }

    /// Overwrite slot `index` with a promoted key and its count.
    pub(crate) fn replace_at(&mut self, index: usize, key: K, count: usize) -> (K, usize) {
        let old_key = std::mem::replace(&mut self.keys[index], key);
        let old_count = std::mem::replace(&mut self.counts[index], count);
        (old_key, old_count)
    }

    // ============================================================================
    // BORROWING AND MERGING HELPERS
    // ============================================================================

    /// Take the last key, count and (if internal) last child. Used when this
    /// node is the left sibling lending to its right neighbour.
    pub(crate) fn pop_last(&mut self) -> Option<(K, usize, Option<NodeId>)> {
        let key = self.keys.pop()?;
        let count = self.counts.pop()?;
        let child = if self.leaf { None } else { self.children.pop() };
        Some((key, count, child))
    }

    /// Take the first key, count and (if internal) first child. Used when this
    /// node is the right sibling lending to its left neighbour.
    pub(crate) fn pop_first(&mut self) -> Option<(K, usize, Option<NodeId>)> {
        if self.keys.is_empty() {
            return None;
        }
        let key = self.keys.remove(0);
        let count = self.counts.remove(0);
        let child = if self.leaf {
            None
        } else {
            Some(self.children.remove(0))
        };
        Some((key, count, child))
    }

    pub(crate) fn push_front(&mut self, key: K, count: usize, child: Option<NodeId>) {
        self.keys.insert(0, key);
        self.counts.insert(0, count);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    pub(crate) fn push_back(&mut self, key: K, count: usize, child: Option<NodeId>) {
        self.keys.push(key);
        self.counts.push(count);
        if let Some(child) = child {
            self.children.push(child);
        }
    }

    /// Absorb the parent separator followed by every key, count and child of
    /// `right`, which must be this node's immediate right sibling.
    pub(crate) fn merge_with(&mut self, separator: K, separator_count: usize, right: Node<K>) {
        self.keys.push(separator);
        self.counts.push(separator_count);
        self.keys.extend(right.keys);
        self.counts.extend(right.counts);
        self.children.extend(right.children);
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns true if this node holds the maximum `2t - 1` keys.
    pub fn is_full(&self, degree: usize) -> bool {
        self.keys.len() >= 2 * degree - 1
    }

    /// Returns true if this node can give away a key and stay at `t - 1` or more.
    pub fn can_lend(&self, degree: usize) -> bool {
        self.keys.len() >= degree
    }

    /// Returns true if this node holds exactly the minimum `t - 1` keys.
    pub fn is_minimal(&self, degree: usize) -> bool {
        self.keys.len() < degree
    }
}
