//! Multi-heuristic A* with independent queues (IMHA*).

use pathgrid_core::{CellId, Grid};

use crate::config::{SearchConfig, clamp_factor};
use crate::heuristics::HeuristicKind;
use crate::node::{NodeTable, OpenList};
use crate::result::{MultiTables, SearchOutcome, Trace};
use crate::search::SearchType;
use crate::traits::{SearchProblem, SearchRunner};

/// Round-robin over one anchor queue and several inadmissible queues, each
/// with its own `g` values, backpointers and closed set.
///
/// Queue `i` orders by `g_i + w1·h_i`. An inadmissible queue gets its turn
/// only while its minimum key stays within `w2` times the anchor's, which
/// keeps the returned path within `w1·w2` of optimal when the anchor
/// heuristic is consistent.
///
/// Each queue closes cells independently, so a cell can be expanded once
/// per queue. The reported `expanded` count is summed over all queues and is
/// bounded by `cells × 8 × queues` rather than `cells × 8`.
///
/// The `h` kept in the result's per-cell data is always the anchor's; the
/// per-queue estimates are in
/// [`multi_heuristic_data`](crate::SearchResult::multi_heuristic_data).
#[derive(Debug, Clone)]
pub struct SequentialHeuristicRunner<'g> {
    problem: SearchProblem<'g>,
    weight: f64,
    bound: f64,
    heuristics: Vec<HeuristicKind>,
}

impl<'g> SequentialHeuristicRunner<'g> {
    /// `weight` is `w1` (raised to 1 if smaller); `w2` and the inadmissible
    /// heuristics come from `config`.
    pub fn new(problem: SearchProblem<'g>, weight: f64, config: &SearchConfig) -> Self {
        Self {
            problem,
            weight: clamp_factor(weight),
            bound: config.effective_bound(),
            heuristics: config.queue_heuristics(),
        }
    }

    #[inline]
    fn h(&self, queue: usize, id: CellId) -> f64 {
        self.heuristics[queue].estimate(self.problem.grid(), id, self.problem.goal())
    }
}

/// One queue's private search state.
struct Queue {
    table: NodeTable,
    open: OpenList,
    closed: Vec<bool>,
}

impl<'g> SearchRunner<'g> for SequentialHeuristicRunner<'g> {
    fn search_type(&self) -> SearchType {
        SearchType::SequentialHeuristic
    }

    fn run_search(&self) -> SearchOutcome<'g> {
        let kind = self.search_type();
        let p = &self.problem;
        if let Some(outcome) = p.trivial_outcome(kind, self.weight) {
            return outcome;
        }
        let grid = p.grid();
        let (start, goal) = (p.start(), p.goal());
        log::debug!(
            "{kind}: {start} -> {goal}, {} queues, w1 {} w2 {}",
            self.heuristics.len(),
            self.weight,
            self.bound
        );

        let mut queues: Vec<Queue> = (0..self.heuristics.len())
            .map(|i| {
                let mut q = Queue {
                    table: NodeTable::new(grid.len()),
                    open: OpenList::new(grid.len()),
                    closed: vec![false; grid.len()],
                };
                q.table.set(start, 0.0, self.problem.anchor_h(start), None);
                q.open.insert(start, self.weight * self.h(i, start));
                q
            })
            .collect();

        // with no inadmissible heuristics the anchor runs alone
        let rounds: Vec<usize> = if queues.len() > 1 {
            (1..queues.len()).collect()
        } else {
            vec![0]
        };
        let mut expanded = 0;

        while !queues[0].open.is_empty() {
            for &i in &rounds {
                let anchor_min = queues[0].open.min_key();
                let inad_turn = i != 0
                    && !queues[i].open.is_empty()
                    && queues[i].open.min_key() <= self.bound * anchor_min;
                let q = if inad_turn { i } else { 0 };
                if queues[q].open.is_empty() {
                    continue;
                }
                let min = queues[q].open.min_key();

                if queues[q].table.g(goal) <= min {
                    if let Some(path) = queues[q].table.path_to(goal) {
                        return self.finish(path, q, queues, expanded);
                    }
                }

                let Some(s) = queues[q].open.pop() else {
                    continue;
                };
                log::trace!("{kind}: queue {q} expand {s}");
                expanded += self.expand(grid, q, s, &mut queues[q]);
            }
        }

        p.no_path(kind, expanded)
    }
}

impl<'g> SequentialHeuristicRunner<'g> {
    /// Relax the successors of `s` within queue `q`; returns the number of
    /// relaxation attempts.
    fn expand(&self, grid: &Grid, q: usize, s: CellId, queue: &mut Queue) -> usize {
        queue.closed[s.index()] = true;
        let Some(cell) = grid.cell(s) else {
            return 0;
        };
        let g_s = queue.table.g(s);
        let mut attempts = 0;
        for (_, n, cost) in cell.edges() {
            attempts += 1;
            if queue.closed[n.index()] || cost.is_infinite() {
                continue;
            }
            let tentative_g = g_s + cost;
            if tentative_g < queue.table.g(n) {
                queue
                    .table
                    .set(n, tentative_g, self.problem.anchor_h(n), Some(s));
                queue.open.insert(n, tentative_g + self.weight * self.h(q, n));
            }
        }
        attempts
    }

    fn finish(&self, path: Vec<CellId>, q: usize, queues: Vec<Queue>, expanded: usize) -> SearchOutcome<'g> {
        let tables: Vec<NodeTable> = queues.into_iter().map(|q| q.table).collect();
        let trace = Trace {
            table: tables[q].clone(),
            queue: q,
            multi: Some(MultiTables {
                tables,
                heuristics: self.heuristics.clone(),
            }),
        };
        SearchOutcome::Found(self.problem.found(
            self.search_type(),
            path,
            self.weight,
            expanded,
            trace,
        ))
    }
}
