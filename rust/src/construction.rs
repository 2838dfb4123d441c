//! Construction and initialization logic for CountedBTree and nodes.
//!
//! Degree validation happens here, before any node is allocated.

use crate::compact_arena::CompactArena;
use crate::error::{CountedTreeError, InitResult};
use crate::types::{CountedBTree, Node, DEFAULT_DEGREE, MIN_DEGREE};

impl<K> CountedBTree<K> {
    /// Create a counted B-tree with the given minimum degree.
    ///
    /// # Arguments
    ///
    /// * `degree` - Minimum degree `t` (at least 2)
    ///
    /// # Returns
    ///
    /// Returns `Ok(CountedBTree)` if the degree is valid, `Err(CountedTreeError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let tree = CountedBTree::<String>::new(16).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(CountedBTree::<String>::new(1).is_err());
    /// ```
    pub fn new(degree: usize) -> InitResult<Self> {
        validation::validate_degree(degree)?;
        Ok(Self::empty_with(degree))
    }

    /// Create a counted B-tree with default degree.
    ///
    /// This is equivalent to calling `new(DEFAULT_DEGREE)`.
    pub fn with_default_degree() -> Self {
        Self::empty_with(DEFAULT_DEGREE)
    }

    /// Single empty leaf root. `degree` must already be validated.
    fn empty_with(degree: usize) -> Self {
        let mut arena = CompactArena::new();
        let root = arena.allocate(Node::new_leaf(degree));
        Self {
            degree,
            root,
            arena,
            total_insertions: 0,
            unique_keys: 0,
        }
    }

    /// Remove every key and reset the counters, keeping the degree.
    pub fn clear(&mut self) {
        *self = Self::empty_with(self.degree);
    }
}

impl<K> Node<K> {
    /// Creates an empty leaf sized for a tree of minimum degree `degree`.
    pub fn new_leaf(degree: usize) -> Self {
        Self::with_reserved(degree, true)
    }

    /// Creates an empty internal node sized for a tree of minimum degree `degree`.
    pub fn new_internal(degree: usize) -> Self {
        Self::with_reserved(degree, false)
    }

    fn with_reserved(degree: usize, leaf: bool) -> Self {
        let max_keys = 2 * degree - 1;
        Self {
            keys: Vec::with_capacity(max_keys),
            counts: Vec::with_capacity(max_keys),
            children: if leaf {
                Vec::new()
            } else {
                Vec::with_capacity(max_keys + 1)
            },
            leaf,
        }
    }
}

impl<K> Default for CountedBTree<K> {
    /// Create a counted B-tree with default degree.
    fn default() -> Self {
        Self::with_default_degree()
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;
    use crate::error::BTreeResult;

    /// Validate that a minimum degree is usable.
    pub fn validate_degree(degree: usize) -> BTreeResult<()> {
        if degree < MIN_DEGREE {
            Err(CountedTreeError::invalid_degree(degree, MIN_DEGREE))
        } else {
            Ok(())
        }
    }

    /// Get a reasonable minimum degree for an expected number of distinct keys.
    ///
    /// Recommended degree (always >= MIN_DEGREE)
    pub fn recommended_degree(expected_keys: usize) -> usize {
        if expected_keys < 100 {
            MIN_DEGREE
        } else if expected_keys < 10_000 {
            16
        } else if expected_keys < 1_000_000 {
            DEFAULT_DEGREE
        } else {
            100
        }
    }
}
