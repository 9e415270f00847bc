//! Search output: [`SearchOutcome`], [`SearchResult`], [`NoPathFound`] and
//! the per-cell diagnostic records.

use std::fmt;

use pathgrid_core::{CellId, Grid};

use crate::heuristics::{self, HeuristicKind};
use crate::node::{NodeTable, path_cost};
use crate::search::SearchType;

// ---------------------------------------------------------------------------
// Per-cell diagnostics
// ---------------------------------------------------------------------------

/// `g`/`h`/weight/backpointer of one cell as seen by a finished search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSearchData {
    /// Cost from start; `+∞` if the cell was never reached.
    pub g: f64,
    /// Anchor (Chebyshev) estimate to the goal.
    pub h: f64,
    /// Heuristic multiplier used for this search.
    pub weight: f64,
    pub back_pointer: Option<CellId>,
}

impl CellSearchData {
    /// `g + weight·h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.weight * self.h
    }
}

/// One entry per heuristic queue for a multi-heuristic search.
///
/// For the sequential runner `g` and `back_pointers` have one entry per
/// queue. For the integrated runner they have a single shared entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiHeuristicCellSearchData {
    pub g: Vec<f64>,
    pub h: Vec<f64>,
    pub back_pointers: Vec<Option<CellId>>,
}

/// Node tables kept from a multi-heuristic run.
#[derive(Debug, Clone)]
pub(crate) struct MultiTables {
    pub(crate) tables: Vec<NodeTable>,
    pub(crate) heuristics: Vec<HeuristicKind>,
}

/// The table that produced the path plus everything needed to report on it.
pub(crate) struct Trace {
    pub(crate) table: NodeTable,
    /// Index of the queue whose backpointers were followed; 0 = anchor.
    pub(crate) queue: usize,
    pub(crate) multi: Option<MultiTables>,
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// A path found by a search, with statistics.
pub struct SearchResult<'g> {
    grid: &'g Grid,
    kind: SearchType,
    start: CellId,
    goal: CellId,
    path: Vec<CellId>,
    in_path: Vec<bool>,
    cost: f64,
    expanded: usize,
    weight: f64,
    trace: Trace,
}

impl<'g> SearchResult<'g> {
    pub(crate) fn new(
        grid: &'g Grid,
        kind: SearchType,
        (start, goal): (CellId, CellId),
        path: Vec<CellId>,
        weight: f64,
        expanded: usize,
        trace: Trace,
    ) -> Self {
        let mut in_path = vec![false; grid.len()];
        for id in &path {
            in_path[id.index()] = true;
        }
        let cost = path_cost(grid, &path);
        Self {
            grid,
            kind,
            start,
            goal,
            path,
            in_path,
            cost,
            expanded,
            weight,
            trace,
        }
    }

    /// The grid that was searched.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// The algorithm that produced this result.
    #[inline]
    pub fn search_type(&self) -> SearchType {
        self.kind
    }

    #[inline]
    pub fn start_and_goal(&self) -> (CellId, CellId) {
        (self.start, self.goal)
    }

    /// The path from start to goal, both included.
    #[inline]
    pub fn path(&self) -> &[CellId] {
        &self.path
    }

    /// Whether `id` lies on the path.
    #[inline]
    pub fn is_in_path(&self, id: CellId) -> bool {
        self.in_path.get(id.index()).copied().unwrap_or(false)
    }

    /// Total cost of the path.
    #[inline]
    pub fn path_length(&self) -> f64 {
        self.cost
    }

    /// Number of moves on the path.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of neighbor-relaxation attempts performed.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Heuristic multiplier used for `f`.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Index of the heuristic queue whose backpointers gave the path
    /// (0 = anchor; always 0 for single-heuristic searches).
    #[inline]
    pub fn path_queue(&self) -> usize {
        self.trace.queue
    }

    /// Search data for `id`, read from the table whose backpointers gave the
    /// path. `h` is always the anchor (Chebyshev) estimate, whichever queue
    /// produced the path; cells the search never reached get `g = +∞`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the grid.
    pub fn cell_search_data(&self, id: CellId) -> CellSearchData {
        let node = self.trace.table.get(id);
        if node.generated {
            CellSearchData {
                g: node.g,
                h: node.h,
                weight: self.weight,
                back_pointer: node.parent,
            }
        } else {
            CellSearchData {
                g: f64::INFINITY,
                h: heuristics::chebyshev(self.grid, id, self.goal),
                weight: self.weight,
                back_pointer: None,
            }
        }
    }

    /// Per-queue data for multi-heuristic searches; `None` otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the grid.
    pub fn multi_heuristic_data(&self, id: CellId) -> Option<MultiHeuristicCellSearchData> {
        let multi = self.trace.multi.as_ref()?;
        Some(MultiHeuristicCellSearchData {
            g: multi.tables.iter().map(|t| t.g(id)).collect(),
            h: multi
                .heuristics
                .iter()
                .map(|h| h.estimate(self.grid, id, self.goal))
                .collect(),
            back_pointers: multi.tables.iter().map(|t| t.get(id).parent).collect(),
        })
    }
}

impl fmt::Debug for SearchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResult")
            .field("kind", &self.kind)
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("cost", &self.cost)
            .field("steps", &self.step_count())
            .field("expanded", &self.expanded)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// NoPathFound / SearchOutcome
// ---------------------------------------------------------------------------

/// The frontier was exhausted before the goal test succeeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoPathFound {
    pub kind: SearchType,
    pub start: CellId,
    pub goal: CellId,
    pub expanded: usize,
}

impl fmt::Display for NoPathFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: no path from {} to {} ({} expanded)",
            self.kind, self.start, self.goal, self.expanded
        )
    }
}

impl std::error::Error for NoPathFound {}

/// Result of one search call. Callers must branch on both variants.
#[derive(Debug)]
pub enum SearchOutcome<'g> {
    Found(SearchResult<'g>),
    NoPathFound(NoPathFound),
}

impl<'g> SearchOutcome<'g> {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The result, if a path was found.
    pub fn found(self) -> Option<SearchResult<'g>> {
        match self {
            Self::Found(r) => Some(r),
            Self::NoPathFound(_) => None,
        }
    }

    pub fn as_found(&self) -> Option<&SearchResult<'g>> {
        match self {
            Self::Found(r) => Some(r),
            Self::NoPathFound(_) => None,
        }
    }

    /// Convert into a `Result` so `?` can be used on the no-path case.
    pub fn into_result(self) -> Result<SearchResult<'g>, NoPathFound> {
        match self {
            Self::Found(r) => Ok(r),
            Self::NoPathFound(e) => Err(e),
        }
    }

    /// Relaxation attempts performed, whichever way the search ended.
    pub fn expanded(&self) -> usize {
        match self {
            Self::Found(r) => r.expanded,
            Self::NoPathFound(e) => e.expanded,
        }
    }
}
