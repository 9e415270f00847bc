use pathgrid_core::{CellId, Grid};

use crate::heap::BinaryMinHeap;

// ---------------------------------------------------------------------------
// Per-search node bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) parent: Option<CellId>,
    pub(crate) generated: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            parent: None,
            generated: false,
        }
    }
}

/// Dense, id-indexed `g`/`h`/backpointer table owned by one search run.
#[derive(Clone, Debug)]
pub(crate) struct NodeTable {
    nodes: Vec<Node>,
}

impl NodeTable {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::default(); len],
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: CellId) -> &Node {
        &self.nodes[id.index()]
    }

    /// `+∞` for cells never generated.
    #[inline]
    pub(crate) fn g(&self, id: CellId) -> f64 {
        self.nodes[id.index()].g
    }

    #[inline]
    pub(crate) fn set(&mut self, id: CellId, g: f64, h: f64, parent: Option<CellId>) {
        self.nodes[id.index()] = Node {
            g,
            h,
            parent,
            generated: true,
        };
    }

    /// Follow backpointers from `goal` back to a root; returns the path in
    /// start-to-goal order, or `None` if `goal` was never generated.
    pub(crate) fn path_to(&self, goal: CellId) -> Option<Vec<CellId>> {
        if !self.get(goal).generated {
            return None;
        }
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.get(current).parent {
            // g strictly decreases along backpointers, so this only trips on
            // a corrupted table
            if path.len() > self.nodes.len() {
                return None;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Sum of edge costs along consecutive cells of `path`.
pub(crate) fn path_cost(grid: &Grid, path: &[CellId]) -> f64 {
    path.windows(2)
        .map(|w| {
            grid.cell(w[0])
                .and_then(|c| c.edges().find(|(_, n, _)| *n == w[1]))
                .map_or(f64::INFINITY, |(_, _, cost)| cost)
        })
        .sum()
}

// ---------------------------------------------------------------------------
// OpenList
// ---------------------------------------------------------------------------

/// A [`BinaryMinHeap`] of cell ids with lazy deletion.
///
/// `keys[id]` holds the key of the live entry for `id`, if any. Heap entries
/// whose priority no longer matches are stale and are discarded when they
/// reach the top.
pub(crate) struct OpenList {
    heap: BinaryMinHeap<CellId>,
    keys: Vec<Option<f64>>,
}

impl OpenList {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryMinHeap::with_capacity(len, |id: &CellId| id.index()),
            keys: vec![None; len],
        }
    }

    /// Insert `id`, or move it to `key` if already open.
    pub(crate) fn insert(&mut self, id: CellId, key: f64) {
        if self.heap.push(id, key) {
            self.keys[id.index()] = Some(key);
        }
    }

    pub(crate) fn remove(&mut self, id: CellId) {
        self.keys[id.index()] = None;
    }

    /// Whether no live entry remains. Live keys may themselves be `+∞`.
    pub(crate) fn is_empty(&mut self) -> bool {
        self.purge();
        self.heap.is_empty()
    }

    /// Smallest live key, or `+∞` when empty.
    pub(crate) fn min_key(&mut self) -> f64 {
        self.purge();
        self.heap.peek_priority().unwrap_or(f64::INFINITY)
    }

    /// Remove and return the live entry with the smallest key.
    pub(crate) fn pop(&mut self) -> Option<CellId> {
        self.purge();
        let (id, _) = self.heap.try_pop()?;
        self.keys[id.index()] = None;
        Some(id)
    }

    fn purge(&mut self) {
        while let Some((id, priority)) = self.heap.peek().map(|(id, p)| (*id, p)) {
            if self.keys[id.index()] == Some(priority) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_follows_backpointers() {
        let mut t = NodeTable::new(5);
        t.set(CellId(0), 0.0, 2.0, None);
        t.set(CellId(3), 1.0, 1.0, Some(CellId(0)));
        t.set(CellId(4), 2.0, 0.0, Some(CellId(3)));
        assert_eq!(
            t.path_to(CellId(4)),
            Some(vec![CellId(0), CellId(3), CellId(4)])
        );
        assert_eq!(t.path_to(CellId(2)), None);
        assert!(t.g(CellId(2)).is_infinite());
    }

    #[test]
    fn open_list_skips_stale_entries() {
        let mut open = OpenList::new(4);
        open.insert(CellId(1), 5.0);
        open.insert(CellId(2), 3.0);
        open.insert(CellId(1), 2.0); // decrease key
        assert_eq!(open.min_key(), 2.0);
        assert_eq!(open.pop(), Some(CellId(1)));
        assert_eq!(open.keys[1], None);
        // the old (1, 5.0) entry is stale and never surfaces
        assert_eq!(open.pop(), Some(CellId(2)));
        assert_eq!(open.pop(), None);
        assert_eq!(open.min_key(), f64::INFINITY);
    }

    #[test]
    fn removed_entries_are_skipped() {
        let mut open = OpenList::new(3);
        open.insert(CellId(0), 1.0);
        open.insert(CellId(1), 2.0);
        open.remove(CellId(0));
        assert_eq!(open.min_key(), 2.0);
        assert_eq!(open.pop(), Some(CellId(1)));
    }

    #[test]
    fn cost_along_path() {
        let g = Grid::new(3, 3).unwrap();
        let straight = path_cost(&g, &[CellId(0), CellId(1), CellId(2)]);
        assert_eq!(straight, 2.0);
        let diag = path_cost(&g, &[CellId(0), CellId(4), CellId(8)]);
        assert!((diag - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(path_cost(&g, &[CellId(0)]), 0.0);
        // not adjacent
        assert!(path_cost(&g, &[CellId(0), CellId(8)]).is_infinite());
    }
}
