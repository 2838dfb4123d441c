//! Summary statistics and frequency rankings for CountedBTree.

use std::cmp::Reverse;
use std::fmt;

use crate::types::CountedBTree;

/// Snapshot of a tree's size and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// `insert` calls since construction or the last `clear`.
    pub total_insertions: u64,
    /// Distinct keys currently stored.
    pub unique_keys: usize,
    /// Sum of all occurrence counts currently stored.
    pub total_count: usize,
    /// Number of node levels; a lone root leaf has height 1.
    pub height: usize,
    pub node_count: usize,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total insertions: {}", self.total_insertions)?;
        writeln!(f, "Unique keys: {}", self.unique_keys)?;
        writeln!(f, "Occurrences held: {}", self.total_count)?;
        writeln!(f, "Height: {}", self.height)?;
        write!(f, "Nodes: {}", self.node_count)
    }
}

impl<K> CountedBTree<K> {
    /// Collect the current statistics.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_insertions: self.total_insertions,
            unique_keys: self.unique_keys,
            total_count: self.total_count(),
            height: self.height(),
            node_count: self.arena.len(),
        }
    }

    /// The `n` keys with the highest counts, most frequent first.
    ///
    /// Ties are broken by ascending key.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_btree::CountedBTree;
    ///
    /// let mut tree = CountedBTree::new(2).unwrap();
    /// for word in "the lord is the lord of the sabbath".split(' ') {
    ///     tree.insert(word);
    /// }
    /// assert_eq!(tree.most_frequent(2), vec![(&"the", 3), (&"lord", 2)]);
    /// ```
    pub fn most_frequent(&self, n: usize) -> Vec<(&K, usize)> {
        let mut items: Vec<_> = self.iter().collect();
        // Stable sort keeps ascending key order among equal counts.
        items.sort_by_key(|&(_, count)| Reverse(count));
        items.truncate(n);
        items
    }
}
