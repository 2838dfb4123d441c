//! Iterator implementations for CountedBTree.
//!
//! Iteration is an in-order walk driven by an explicit stack of
//! `(node, next slot)` frames, so it is lazy and can be dropped early. Calling
//! `iter()` again starts a fresh walk.

use std::iter::FusedIterator;

use crate::types::{CountedBTree, NodeId};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over `(key, count)` pairs in ascending key order.
#[derive(Debug)]
pub struct ItemIterator<'a, K> {
    tree: &'a CountedBTree<K>,
    /// Path from the root to the current node; the slot is the next key to yield.
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

/// Iterator over keys in ascending order.
#[derive(Debug)]
pub struct KeyIterator<'a, K> {
    items: ItemIterator<'a, K>,
}

// ============================================================================
// TREE ITERATOR METHODS
// ============================================================================

impl<K> CountedBTree<K> {
    /// Returns an iterator over all `(key, count)` pairs in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let mut tree = CountedBTree::new(2).unwrap();
    /// for word in ["b", "a", "c", "a"] {
    ///     tree.insert(word);
    /// }
    /// let items: Vec<_> = tree.iter().collect();
    /// assert_eq!(items, vec![(&"a", 2), (&"b", 1), (&"c", 1)]);
    /// ```
    pub fn iter(&self) -> ItemIterator<'_, K> {
        ItemIterator::new(self)
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, K> {
        KeyIterator { items: self.iter() }
    }
}

impl<'a, K> IntoIterator for &'a CountedBTree<K> {
    type Item = (&'a K, usize);
    type IntoIter = ItemIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K> ItemIterator<'a, K> {
    pub fn new(tree: &'a CountedBTree<K>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.unique_keys,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    /// Push `node_id` and its leftmost descendants down to a leaf.
    fn push_left_spine(&mut self, mut node_id: NodeId) {
        loop {
            self.stack.push((node_id, 0));
            let node = &self.tree.arena[node_id];
            if node.leaf {
                break;
            }
            node_id = node.children[0];
        }
    }
}

// Manual impls: cloning an iterator never needs `K: Clone`.
impl<K> Clone for ItemIterator<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K> Clone for KeyIterator<'_, K> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<'a, K> Iterator for ItemIterator<'a, K> {
    type Item = (&'a K, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let (node_id, slot) = self.stack.last_mut()?;
            let node = &tree.arena[*node_id];

            if *slot < node.keys.len() {
                let index = *slot;
                *slot += 1;
                if !node.leaf {
                    self.push_left_spine(node.children[index + 1]);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&node.keys[index], node.counts[index]));
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for ItemIterator<'_, K> {}

impl<K> FusedIterator for ItemIterator<'_, K> {}

// ============================================================================
// KEYITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K> Iterator for KeyIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K> ExactSizeIterator for KeyIterator<'_, K> {}

impl<K> FusedIterator for KeyIterator<'_, K> {}
