//! Compact arena holding every node of a CountedBTree.
//!
//! Nodes are addressed by `NodeId` instead of boxed pointers, so splits and
//! merges only move ids between `children` vectors. Freed slots are recycled
//! through a free list.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

pub type NodeId = u32;
pub const NULL_NODE: NodeId = u32::MAX;

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Arena allocator storing values directly in a `Vec<T>`.
/// Freed slots are reset to `T::default()` and tracked by `allocated_mask`.
#[derive(Debug, Clone)]
pub struct CompactArena<T> {
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    allocated_mask: Vec<bool>,
    allocated_count: usize,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
            allocated_count: 0,
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };
        self.allocated_count += 1;

        // NULL_NODE is reserved, so the last usable index is u32::MAX - 1.
        match NodeId::try_from(index) {
            Ok(id) if id != NULL_NODE => id,
            _ => panic!("arena exhausted: index {} does not fit in NodeId", index),
        }
    }

    /// Deallocate an item from the arena and return it
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T>
    where
        T: Default,
    {
        let index = self.live_index(id)?;

        self.allocated_mask[index] = false;
        self.free_list.push(index);
        self.allocated_count -= 1;

        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.live_index(id)?;
        Some(&self.storage[index])
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.live_index(id)?;
        Some(&mut self.storage[index])
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.live_index(id).is_some()
    }

    fn live_index(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(index)
        } else {
            None
        }
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.allocated_count;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated_count
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.allocated_count == 0
    }

    /// Drop every item and forget all ids.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.free_list.clear();
        self.allocated_mask.clear();
        self.allocated_count = 0;
    }
}

/// Direct access for ids known to be live. Panics on a freed or unknown id,
/// which can only happen if the tree structure is corrupt.
impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("arena id {} is not allocated", id),
        }
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("arena id {} is not allocated", id),
        }
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
