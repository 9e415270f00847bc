//! An array-backed binary min-heap with O(1) membership lookup.

use std::collections::HashMap;
use std::mem;

/// Keys below this are counted in a dense table; larger ones in a map.
const DENSE_KEY_LIMIT: usize = 1 << 20;

struct HeapNode<T> {
    item: T,
    priority: f64,
    seq: u64,
}

impl<T> HeapNode<T> {
    /// Strict heap order: lower priority first, then earlier insertion.
    #[inline]
    fn before(&self, other: &Self) -> bool {
        self.priority < other.priority || (self.priority == other.priority && self.seq < other.seq)
    }
}

/// Min-priority queue over `(item, priority)` pairs.
///
/// Equal priorities pop in insertion order. Membership is counted per value
/// of the caller-supplied `key` function. Keys below the initial capacity
/// or 2^20 index a dense table (cell ids land here); anything larger, such
/// as a hash, goes to a map. The same item may be pushed more than once; it stays
/// [`contains`](Self::contains)-visible until every copy has been popped.
pub struct BinaryMinHeap<T> {
    nodes: Vec<HeapNode<T>>,
    members: Vec<u32>,
    sparse: HashMap<usize, u32>,
    key: fn(&T) -> usize,
    next_seq: u64,
}

impl<T> BinaryMinHeap<T> {
    /// Create an empty heap.
    pub fn new(key: fn(&T) -> usize) -> Self {
        Self::with_capacity(0, key)
    }

    /// Create an empty heap with room for `capacity` entries and a dense
    /// membership table for keys below `capacity`.
    pub fn with_capacity(capacity: usize, key: fn(&T) -> usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            members: vec![0; capacity],
            sparse: HashMap::new(),
            key,
            next_seq: 0,
        }
    }

    /// Build a heap from `items` in O(n). Items with a NaN priority are
    /// dropped.
    pub fn from_items(items: impl IntoIterator<Item = (T, f64)>, key: fn(&T) -> usize) -> Self {
        let mut heap = Self::new(key);
        for (item, priority) in items {
            if priority.is_nan() {
                continue;
            }
            heap.track(&item);
            let seq = heap.bump_seq();
            heap.nodes.push(HeapNode {
                item,
                priority,
                seq,
            });
        }
        for i in (0..heap.nodes.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    /// Number of entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `item`. Returns `false` (and does nothing) for a NaN priority.
    pub fn push(&mut self, item: T, priority: f64) -> bool {
        if priority.is_nan() {
            return false;
        }
        self.track(&item);
        let seq = self.bump_seq();
        self.nodes.push(HeapNode {
            item,
            priority,
            seq,
        });
        self.sift_up(self.nodes.len() - 1);
        true
    }

    /// Remove and return the minimum-priority item.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty.
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Some((item, _)) => item,
            None => panic!("BinaryMinHeap::pop on an empty heap"),
        }
    }

    /// Remove and return the minimum-priority item with its priority, or
    /// `None` if the heap is empty.
    pub fn try_pop(&mut self) -> Option<(T, f64)> {
        let last = self.nodes.pop()?;
        let root = if self.nodes.is_empty() {
            last
        } else {
            let root = mem::replace(&mut self.nodes[0], last);
            self.sift_down(0);
            root
        };
        self.untrack(&root.item);
        Some((root.item, root.priority))
    }

    /// The minimum-priority item and its priority, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<(&T, f64)> {
        self.nodes.first().map(|n| (&n.item, n.priority))
    }

    /// The minimum priority, without removing it.
    #[inline]
    pub fn peek_priority(&self) -> Option<f64> {
        self.nodes.first().map(|n| n.priority)
    }

    /// Whether at least one copy of `item` is in the heap.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        let k = (self.key)(item);
        let count = match self.members.get(k) {
            Some(count) => Some(count),
            None => self.sparse.get(&k),
        };
        count.is_some_and(|&count| count > 0)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.members.iter_mut().for_each(|c| *c = 0);
        self.sparse.clear();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn track(&mut self, item: &T) {
        let k = (self.key)(item);
        if k < self.members.len() {
            self.members[k] += 1;
        } else if k < DENSE_KEY_LIMIT {
            self.members.resize(k + 1, 0);
            self.members[k] += 1;
        } else {
            *self.sparse.entry(k).or_insert(0) += 1;
        }
    }

    fn untrack(&mut self, item: &T) {
        let k = (self.key)(item);
        if let Some(count) = self.members.get_mut(k) {
            *count = count.saturating_sub(1);
        } else if let Some(count) = self.sparse.get_mut(&k) {
            *count -= 1;
            if *count == 0 {
                self.sparse.remove(&k);
            }
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.nodes[i].before(&self.nodes[parent]) {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut min = i;
            if left < len && self.nodes[left].before(&self.nodes[min]) {
                min = left;
            }
            if right < len && self.nodes[right].before(&self.nodes[min]) {
                min = right;
            }
            if min == i {
                break;
            }
            self.nodes.swap(i, min);
            i = min;
        }
    }
}
