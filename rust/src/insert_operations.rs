//! INSERT operations for CountedBTree.
//!
//! Top-down insertion with preemptive splitting: the root is split before the
//! descent if it is full, and every full child is split before it is entered,
//! so the node being modified always has room for one more key.

use tracing::{debug, trace};

use crate::types::{CountedBTree, Node, NodeId};
use std::cmp::Ordering;

impl<K: Ord> CountedBTree<K> {
    /// Insert one occurrence of `key`.
    ///
    /// Returns true if `key` was not present before (a new distinct key),
    /// false if an existing count was incremented.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let mut tree = CountedBTree::new(2).unwrap();
    /// assert!(tree.insert("faith"));
    /// assert!(!tree.insert("faith"));
    /// assert_eq!(tree.search(&"faith"), Some(2));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.arena[self.root].is_full(self.degree) {
            self.grow_root();
        }

        let is_new = self.insert_non_full(self.root, key);

        self.total_insertions += 1;
        if is_new {
            self.unique_keys += 1;
        }
        is_new
    }

    /// Put a new internal root above the current (full) root and split the old
    /// root into it. This is the only place the tree gets taller.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let mut new_root = Node::new_internal(self.degree);
        new_root.children.push(old_root);
        let new_root_id = self.arena.allocate(new_root);

        self.split_child(new_root_id, 0);
        self.root = new_root_id;
        debug!(old_root, new_root = new_root_id, "root split, height grew by one");
    }

    /// Split the full child at `index` of `parent`, promoting its median into
    /// `parent` and linking the new right sibling at `index + 1`.
    pub(crate) fn split_child(&mut self, parent: NodeId, index: usize) {
        let child = self.arena[parent].children[index];
        let split = self.arena[child].split_full(self.degree);
        let right = self.arena.allocate(split.right);

        self.arena[parent].insert_separator(
            index,
            split.separator_key,
            split.separator_count,
            right,
        );
        trace!(parent, child, right, "split full child");
    }

    /// Insert into the subtree rooted at `node_id`, which must not be full.
    fn insert_non_full(&mut self, mut node_id: NodeId, key: K) -> bool {
        loop {
            let node = &self.arena[node_id];
            if node.leaf {
                return self.arena[node_id].insert_or_increment(key);
            }

            let mut index = match node.find(&key) {
                // Equal keys are counted where they sit and never pushed deeper.
                Ok(slot) => {
                    self.arena[node_id].counts[slot] += 1;
                    return false;
                }
                Err(child_index) => child_index,
            };

            if self.arena[node.children[index]].is_full(self.degree) {
                self.split_child(node_id, index);
                let promoted = &self.arena[node_id].keys[index];
                match key.cmp(promoted) {
                    Ordering::Equal => {
                        self.arena[node_id].counts[index] += 1;
                        return false;
                    }
                    Ordering::Greater => index += 1,
                    Ordering::Less => {}
                }
            }

            node_id = self.arena[node_id].children[index];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_counts_duplicates() {
        let mut tree = CountedBTree::new(50).unwrap();
        for word in ["the", "the", "lord", "the"] {
            tree.insert(word);
        }
        assert_eq!(tree.search(&"the"), Some(3));
        assert_eq!(tree.search(&"lord"), Some(1));
        assert_eq!(tree.total_insertions, 4);
        assert_eq!(tree.unique_keys, 2);
    }

    #[test]
    fn test_root_split_grows_height_by_one() {
        let mut tree = CountedBTree::new(2).unwrap();
        for i in 0..3 {
            tree.insert(i);
        }
        assert_eq!(tree.height(), 1);
        assert!(tree.arena[tree.root].is_full(2));

        tree.insert(3);
        assert_eq!(tree.height(), 2);
        let root = &tree.arena[tree.root];
        assert_eq!(root.keys, vec![1]);
        assert_eq!(root.children.len(), 2);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_root_never_exceeds_max_keys() {
        let mut tree = CountedBTree::new(2).unwrap();
        for i in 1..=10 {
            tree.insert(i);
            assert!(tree.arena[tree.root].len() <= 3);
            assert!(tree.check_invariants());
        }
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_duplicate_of_promoted_median_stays_put() {
        let mut tree = CountedBTree::new(2).unwrap();
        for i in [10, 20, 30, 40, 50] {
            tree.insert(i);
        }
        // Root is [20], right child [30, 40, 50] is full; inserting 40 splits
        // it and promotes 40, which must then be counted in the root.
        tree.insert(40);
        assert_eq!(tree.arena[tree.root].keys, vec![20, 40]);
        assert_eq!(tree.search(&40), Some(2));
        assert_eq!(tree.len(), 5);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_split_child_links_new_sibling() {
        let mut tree = CountedBTree::new(2).unwrap();
        for i in 0..7 {
            tree.insert(i);
        }
        // root [1, 3] over [0] [2] [4, 5, 6]
        let before = tree.arena.len();
        let root = tree.root;
        let last = tree.arena[root].children.len() - 1;
        tree.split_child(root, last);
        assert_eq!(tree.arena.len(), before + 1);
        assert!(tree.check_invariants());
    }
}
