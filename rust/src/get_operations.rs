//! GET operations for CountedBTree.
//!
//! Lookups never fail: an absent key is reported as `None`/`false`.

use crate::types::{CountedBTree, Node, NodeId};

impl<K: Ord> CountedBTree<K> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Get the occurrence count of `key`.
    ///
    /// # Returns
    ///
    /// The count if the key is present, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let mut tree = CountedBTree::with_default_degree();
    /// tree.insert("the");
    /// tree.insert("the");
    /// assert_eq!(tree.search(&"the"), Some(2));
    /// assert_eq!(tree.search(&"moses"), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<usize> {
        self.locate(key)
            .map(|(node_id, slot)| self.arena[node_id].counts[slot])
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Find the node holding `key` and the key's slot within it.
    pub fn locate(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut node_id = self.root;
        loop {
            let node = &self.arena[node_id];
            match node.find(key) {
                Ok(slot) => return Some((node_id, slot)),
                Err(_) if node.leaf => return None,
                Err(child_index) => node_id = node.children[child_index],
            }
        }
    }

    // ============================================================================
    // NODE ACCESS
    // ============================================================================

    /// Id of the current root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Get a node by id, `None` if the id is not allocated.
    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.arena.get(id)
    }

    /// Smallest key and its count.
    pub fn first(&self) -> Option<(&K, usize)> {
        let mut node = &self.arena[self.root];
        while !node.leaf {
            node = &self.arena[node.children[0]];
        }
        node.keys.first().map(|key| (key, node.counts[0]))
    }

    /// Largest key and its count.
    pub fn last(&self) -> Option<(&K, usize)> {
        let mut node = &self.arena[self.root];
        while !node.leaf {
            node = &self.arena[node.children[node.children.len() - 1]];
        }
        let last = node.keys.len().checked_sub(1)?;
        Some((&node.keys[last], node.counts[last]))
    }
}
