use pathgrid_core::{CellId, Grid};

use crate::error::SearchError;
use crate::heuristics;
use crate::node::NodeTable;
use crate::result::{NoPathFound, SearchOutcome, SearchResult, Trace};
use crate::search::SearchType;

/// One search algorithm bound to a problem.
///
/// Implementations keep no state between calls: every `run_search`
/// allocates its own tables, so a runner can be run repeatedly and many
/// runners can share one `&Grid` across threads.
pub trait SearchRunner<'g> {
    /// The algorithm this runner implements.
    fn search_type(&self) -> SearchType;

    /// Run to completion.
    fn run_search(&self) -> SearchOutcome<'g>;
}

/// A grid plus a start/goal pair known to lie inside it.
#[derive(Debug, Clone, Copy)]
pub struct SearchProblem<'g> {
    grid: &'g Grid,
    start: CellId,
    goal: CellId,
}

impl<'g> SearchProblem<'g> {
    pub fn new(grid: &'g Grid, start: CellId, goal: CellId) -> Result<Self, SearchError> {
        for id in [start, goal] {
            if !grid.contains(id) {
                return Err(SearchError::UnknownCell {
                    id,
                    cells: grid.len(),
                });
            }
        }
        Ok(Self { grid, start, goal })
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> CellId {
        self.goal
    }

    /// Anchor heuristic from `id` to the goal.
    #[inline]
    pub(crate) fn anchor_h(&self, id: CellId) -> f64 {
        heuristics::chebyshev(self.grid, id, self.goal)
    }

    /// Outcomes decided without searching: a blocked endpoint, or
    /// `start == goal`.
    pub(crate) fn trivial_outcome(&self, kind: SearchType, weight: f64) -> Option<SearchOutcome<'g>> {
        let blocked = |id| self.grid.cell(id).is_none_or(|c| c.is_blocked());
        if blocked(self.start) || blocked(self.goal) {
            log::warn!(
                "{kind}: blocked endpoint (start {}, goal {})",
                self.start,
                self.goal
            );
            return Some(self.no_path(kind, 0));
        }
        if self.start != self.goal {
            return None;
        }
        let mut table = NodeTable::new(self.grid.len());
        table.set(self.start, 0.0, 0.0, None);
        let trace = Trace {
            table,
            queue: 0,
            multi: None,
        };
        Some(SearchOutcome::Found(self.found(
            kind,
            vec![self.start],
            weight,
            0,
            trace,
        )))
    }

    pub(crate) fn found(
        &self,
        kind: SearchType,
        path: Vec<CellId>,
        weight: f64,
        expanded: usize,
        trace: Trace,
    ) -> SearchResult<'g> {
        let result = SearchResult::new(
            self.grid,
            kind,
            (self.start, self.goal),
            path,
            weight,
            expanded,
            trace,
        );
        log::debug!(
            "{kind}: path {} -> {} cost {:.3} in {} steps, {} expanded",
            self.start,
            self.goal,
            result.path_length(),
            result.step_count(),
            expanded
        );
        result
    }

    pub(crate) fn no_path(&self, kind: SearchType, expanded: usize) -> SearchOutcome<'g> {
        log::debug!(
            "{kind}: no path {} -> {}, {} expanded",
            self.start,
            self.goal,
            expanded
        );
        SearchOutcome::NoPathFound(NoPathFound {
            kind,
            start: self.start,
            goal: self.goal,
            expanded,
        })
    }
}
