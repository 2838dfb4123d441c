//! DELETE operations for CountedBTree.
//!
//! Removing an occurrence of a key whose count is above one only decrements
//! the count. Removing the last occurrence deletes the key top-down: before
//! the recursion enters a child, that child is topped up to at least `t` keys
//! by borrowing from a sibling or merging with one, so no fix-up pass is
//! needed on the way back. The parent id and child index are passed along
//! explicitly; nodes never point back at their parents.

use tracing::{debug, trace};

use crate::types::{CountedBTree, Node, NodeId};

impl<K: Ord> CountedBTree<K> {
    /// Remove one occurrence of `key`.
    ///
    /// Returns true if the key was present (its count was decremented, and the
    /// key deleted when the count reached zero), false if it was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let mut tree = CountedBTree::new(50).unwrap();
    /// tree.insert("faith");
    /// assert!(tree.remove(&"faith"));
    /// assert!(!tree.remove(&"faith"));
    /// assert_eq!(tree.search(&"faith"), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let Some((node_id, slot)) = self.locate(key) else {
            return false;
        };

        if self.arena[node_id].counts[slot] > 1 {
            self.arena[node_id].decrement_at(slot);
            return true;
        }

        let removed = self.delete_entry(self.root, key);
        debug_assert_eq!(removed, Some(1), "located key vanished during delete");
        self.unique_keys -= 1;
        self.collapse_root_if_needed();
        true
    }

    /// Delete every occurrence of `key`, returning the count it had.
    pub fn remove_all(&mut self, key: &K) -> Option<usize> {
        self.locate(key)?;
        let count = self.delete_entry(self.root, key)?;
        self.unique_keys -= 1;
        self.collapse_root_if_needed();
        Some(count)
    }

    // ============================================================================
    // HELPERS FOR DELETE OPERATIONS
    // ============================================================================

    /// Delete `key` (with its whole count) from the subtree at `node_id`.
    /// `node_id` must be the root or hold at least `t` keys.
    fn delete_entry(&mut self, mut node_id: NodeId, key: &K) -> Option<usize> {
        loop {
            let node = &self.arena[node_id];
            match node.find(key) {
                Ok(slot) if node.leaf => {
                    let node = &mut self.arena[node_id];
                    node.keys.remove(slot);
                    return Some(node.counts.remove(slot));
                }
                Ok(slot) => return self.delete_from_internal(node_id, slot, key),
                Err(_) if node.leaf => return None,
                Err(child_index) => {
                    node_id = self.child_for_descent(node_id, child_index);
                }
            }
        }
    }

    /// Delete the key at `slot` of internal node `node_id`.
    fn delete_from_internal(&mut self, node_id: NodeId, slot: usize, key: &K) -> Option<usize> {
        let node = &self.arena[node_id];
        let left = node.children[slot];
        let right = node.children[slot + 1];

        if self.arena[left].can_lend(self.degree) {
            // The predecessor leaves its leaf together with its count.
            let (pred_key, pred_count) = self.take_max(left)?;
            let (_, count) = self.arena[node_id].replace_at(slot, pred_key, pred_count);
            Some(count)
        } else if self.arena[right].can_lend(self.degree) {
            let (succ_key, succ_count) = self.take_min(right)?;
            let (_, count) = self.arena[node_id].replace_at(slot, succ_key, succ_count);
            Some(count)
        } else {
            self.merge_children(node_id, slot);
            let merged = self.arena[node_id].children[slot];
            self.delete_entry(merged, key)
        }
    }

    /// Remove and return the largest key of the subtree at `node_id`, which
    /// must hold at least `t` keys.
    fn take_max(&mut self, mut node_id: NodeId) -> Option<(K, usize)> {
        loop {
            let node = &self.arena[node_id];
            if node.leaf {
                let (key, count, _) = self.arena[node_id].pop_last()?;
                return Some((key, count));
            }
            let last = node.children.len() - 1;
            node_id = self.child_for_descent(node_id, last);
        }
    }

    /// Remove and return the smallest key of the subtree at `node_id`, which
    /// must hold at least `t` keys.
    fn take_min(&mut self, mut node_id: NodeId) -> Option<(K, usize)> {
        loop {
            let node = &self.arena[node_id];
            if node.leaf {
                let (key, count, _) = self.arena[node_id].pop_first()?;
                return Some((key, count));
            }
            node_id = self.child_for_descent(node_id, 0);
        }
    }

    /// Return the child to descend into at `index`, filling it first if it
    /// only holds `t - 1` keys. A merge with the left sibling moves the target
    /// one slot to the left.
    fn child_for_descent(&mut self, parent: NodeId, index: usize) -> NodeId {
        let child = self.arena[parent].children[index];
        if !self.arena[child].is_minimal(self.degree) {
            return child;
        }
        let index = self.fill(parent, index);
        self.arena[parent].children[index]
    }

    /// Top up the minimal child at `index` of `parent`.
    ///
    /// Borrows from the left sibling, else from the right sibling, else merges
    /// with the right sibling (or the left one for the last child). Returns the
    /// index the child's keys now live at.
    fn fill(&mut self, parent: NodeId, index: usize) -> usize {
        let node = &self.arena[parent];
        let child_count = node.children.len();

        if index > 0 && self.arena[node.children[index - 1]].can_lend(self.degree) {
            self.borrow_from_left(parent, index);
            index
        } else if index + 1 < child_count
            && self.arena[node.children[index + 1]].can_lend(self.degree)
        {
            self.borrow_from_right(parent, index);
            index
        } else if index + 1 < child_count {
            self.merge_children(parent, index);
            index
        } else {
            self.merge_children(parent, index - 1);
            index - 1
        }
    }

    /// Rotate right: the left sibling's last key moves up into the separator
    /// slot, the old separator moves down to the front of the child.
    fn borrow_from_left(&mut self, parent: NodeId, index: usize) {
        let left = self.arena[parent].children[index - 1];
        let child = self.arena[parent].children[index];

        let Some((key, count, grandchild)) = self.arena[left].pop_last() else {
            return;
        };
        let (sep_key, sep_count) = self.arena[parent].replace_at(index - 1, key, count);
        self.arena[child].push_front(sep_key, sep_count, grandchild);
        trace!(parent, from = left, to = child, "borrowed key from left sibling");
    }

    /// Rotate left: the right sibling's first key moves up into the separator
    /// slot, the old separator moves down to the back of the child.
    fn borrow_from_right(&mut self, parent: NodeId, index: usize) {
        let right = self.arena[parent].children[index + 1];
        let child = self.arena[parent].children[index];

        let Some((key, count, grandchild)) = self.arena[right].pop_first() else {
            return;
        };
        let (sep_key, sep_count) = self.arena[parent].replace_at(index, key, count);
        self.arena[child].push_back(sep_key, sep_count, grandchild);
        trace!(parent, from = right, to = child, "borrowed key from right sibling");
    }

    /// Merge child `index + 1` into child `index` around separator `index`,
    /// freeing the right child.
    pub(crate) fn merge_children(&mut self, parent: NodeId, index: usize) {
        let (sep_key, sep_count, right) = self.arena[parent].remove_separator(index);
        let right_node = self.release(right);
        let left = self.arena[parent].children[index];
        self.arena[left].merge_with(sep_key, sep_count, right_node);
        trace!(parent, left, right, "merged siblings");
    }

    /// Replace a keyless internal root by its only child.
    fn collapse_root_if_needed(&mut self) {
        while self.arena[self.root].keys.is_empty() && !self.arena[self.root].leaf {
            let old_root = self.root;
            self.root = self.arena[old_root].children[0];
            self.release(old_root);
            debug!(old_root, new_root = self.root, "root collapsed, height shrank by one");
        }
    }

    /// Free a node that has just been unlinked from the tree.
    fn release(&mut self, id: NodeId) -> Node<K> {
        match self.arena.deallocate(id) {
            Some(node) => node,
            None => panic!("node {} released while not allocated", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(degree: usize, keys: impl IntoIterator<Item = i32>) -> CountedBTree<i32> {
        let mut tree = CountedBTree::new(degree).unwrap();
        for k in keys {
            tree.insert(k);
        }
        tree
    }

    #[test]
    fn test_remove_decrements_before_deleting() {
        let mut tree = tree_with(2, [7, 7, 7]);
        assert!(tree.remove(&7));
        assert_eq!(tree.search(&7), Some(2));
        assert_eq!(tree.len(), 1);
        assert!(tree.remove(&7));
        assert!(tree.remove(&7));
        assert_eq!(tree.search(&7), None);
        assert!(tree.is_empty());
        assert!(!tree.remove(&7));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut tree = tree_with(2, 0..20);
        let nodes = tree.arena.len();
        assert!(!tree.remove(&100));
        assert!(!tree.remove(&-1));
        assert_eq!(tree.arena.len(), nodes);
        assert_eq!(tree.len(), 20);
    }

    #[test]
    fn test_remove_internal_key_promotes_successor() {
        // root [1, 3] over [0] [2] [4, 5, 6]; give 2 a count of 3
        let mut tree = tree_with(2, 0..7);
        tree.insert(2);
        tree.insert(2);
        // 3 sits in the root; its left child [2] is minimal, right child [4, 5, 6] can lend
        assert!(tree.remove(&3));
        assert_eq!(tree.search(&3), None);
        assert_eq!(tree.arena[tree.root].keys, vec![1, 4]);
        assert_eq!(tree.search(&2), Some(3));
        assert!(tree.check_invariants());

        assert!(tree.remove(&4));
        assert_eq!(tree.arena[tree.root].keys, vec![1, 5]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_predecessor_carries_its_count() {
        // root [10, 30] over [0] [20] [40, 50, 60]
        let mut tree = tree_with(2, [0, 10, 20, 30, 40, 50, 60]);
        for k in [22, 22, 22, 21] {
            tree.insert(k);
        }
        // left child of 30 is now [20, 21, 22] with 22 counted three times
        assert!(tree.remove(&30));
        assert_eq!(tree.arena[tree.root].keys, vec![10, 22]);
        assert_eq!(tree.arena[tree.root].counts, vec![1, 3]);
        assert_eq!(tree.search(&22), Some(3));
        assert_eq!(tree.search(&30), None);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_merge_then_collapse_root() {
        let mut tree = tree_with(2, 0..4);
        // root [1] over [0] [2, 3]
        assert!(tree.remove(&2));
        // root [1] over [0] [3]; removing 1 merges everything into one leaf
        assert!(tree.remove(&1));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.arena.len(), 1);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_fill_borrows_and_merges() {
        let mut tree = tree_with(2, 0..10);
        for k in [0, 9, 4, 5, 1] {
            assert!(tree.remove(&k), "missing {}", k);
            assert!(tree.check_invariants(), "invariants broken after removing {}", k);
        }
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![2, 3, 6, 7, 8]);
    }

    #[test]
    fn test_remove_all_drops_whole_count() {
        let mut tree = tree_with(3, (0..30).chain(0..30).chain(10..12));
        assert_eq!(tree.remove_all(&10), Some(3));
        assert_eq!(tree.remove_all(&10), None);
        assert_eq!(tree.search(&11), Some(3));
        assert_eq!(tree.len(), 29);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_ascending_delete_returns_to_empty_leaf() {
        let mut tree = tree_with(2, 1..=10);
        for k in 1..=10 {
            assert!(tree.remove(&k));
            assert!(tree.check_invariants(), "invariants broken after removing {}", k);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.arena.len(), 1);
        assert!(tree.arena[tree.root].leaf);
    }
}
