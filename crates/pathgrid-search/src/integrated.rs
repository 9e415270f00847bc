//! Multi-heuristic A* with shared search state (SMHA*).

use pathgrid_core::CellId;

use crate::config::{SearchConfig, clamp_factor};
use crate::heuristics::HeuristicKind;
use crate::node::{NodeTable, OpenList};
use crate::result::{MultiTables, SearchOutcome, Trace};
use crate::search::SearchType;
use crate::traits::{SearchProblem, SearchRunner};

/// Like [`SequentialHeuristicRunner`](crate::SequentialHeuristicRunner), but
/// all queues share one `g`/backpointer table.
///
/// A cell is expanded at most twice: once by the anchor and once by any
/// inadmissible queue. Expanding a cell removes it from every queue. A
/// relaxed successor is queued in the anchor unless the anchor already
/// closed it, and in each inadmissible queue `j` whose key for it is within
/// `w2` of the anchor key, unless an inadmissible queue already closed it.
#[derive(Debug, Clone)]
pub struct IntegratedHeuristicRunner<'g> {
    problem: SearchProblem<'g>,
    weight: f64,
    bound: f64,
    heuristics: Vec<HeuristicKind>,
}

struct State {
    table: NodeTable,
    opens: Vec<OpenList>,
    closed_anchor: Vec<bool>,
    closed_inad: Vec<bool>,
}

impl<'g> IntegratedHeuristicRunner<'g> {
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
    fn key(&self, queue: usize, g: f64, id: CellId) -> f64 {
        let h = self.heuristics[queue].estimate(self.problem.grid(), id, self.problem.goal());
        g + self.weight * h
    }

    fn expand(&self, state: &mut State, s: CellId) -> usize {
        for open in &mut state.opens {
            open.remove(s);
        }
        let Some(cell) = self.problem.grid().cell(s) else {
            return 0;
        };
        let g_s = state.table.g(s);
        let mut attempts = 0;
        for (_, n, cost) in cell.edges() {
            attempts += 1;
            if cost.is_infinite() {
                continue;
            }
            let tentative_g = g_s + cost;
            if tentative_g >= state.table.g(n) {
                continue;
            }
            state
                .table
                .set(n, tentative_g, self.problem.anchor_h(n), Some(s));
            if state.closed_anchor[n.index()] {
                continue;
            }
            let anchor_key = self.key(0, tentative_g, n);
            state.opens[0].insert(n, anchor_key);
            if state.closed_inad[n.index()] {
                continue;
            }
            for j in 1..state.opens.len() {
                let key = self.key(j, tentative_g, n);
                if key <= self.bound * anchor_key {
                    state.opens[j].insert(n, key);
                }
            }
        }
        attempts
    }
}

impl<'g> SearchRunner<'g> for IntegratedHeuristicRunner<'g> {
    fn search_type(&self) -> SearchType {
        SearchType::IntegratedHeuristic
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

        let mut state = State {
            table: NodeTable::new(grid.len()),
            opens: (0..self.heuristics.len())
                .map(|_| OpenList::new(grid.len()))
                .collect(),
            closed_anchor: vec![false; grid.len()],
            closed_inad: vec![false; grid.len()],
        };
        state.table.set(start, 0.0, p.anchor_h(start), None);
        for (i, open) in state.opens.iter_mut().enumerate() {
            open.insert(start, self.key(i, 0.0, start));
        }

        let queues = state.opens.len();
        let rounds: Vec<usize> = if queues > 1 { (1..queues).collect() } else { vec![0] };
        let mut expanded = 0;

        while !state.opens[0].is_empty() {
            for &i in &rounds {
                let anchor_min = state.opens[0].min_key();
                let inad_turn = i != 0
                    && !state.opens[i].is_empty()
                    && state.opens[i].min_key() <= self.bound * anchor_min;
                let q = if inad_turn { i } else { 0 };
                if state.opens[q].is_empty() {
                    continue;
                }
                let min = state.opens[q].min_key();

                if state.table.g(goal) <= min {
                    if let Some(path) = state.table.path_to(goal) {
                        let trace = Trace {
                            table: state.table.clone(),
                            queue: q,
                            multi: Some(MultiTables {
                                tables: vec![state.table],
                                heuristics: self.heuristics.clone(),
                            }),
                        };
                        return SearchOutcome::Found(p.found(kind, path, self.weight, expanded, trace));
                    }
                }

                let Some(s) = state.opens[q].pop() else {
                    continue;
                };
                log::trace!("{kind}: queue {q} expand {s}");
                expanded += self.expand(&mut state, s);
                if q == 0 {
                    state.closed_anchor[s.index()] = true;
                } else {
                    state.closed_inad[s.index()] = true;
                }
            }
        }

        p.no_path(kind, expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::single::SingleHeuristicRunner;
    use pathgrid_core::Grid;
    use std::f64::consts::SQRT_2;

    fn problem(grid: &Grid, start: u32, goal: u32) -> SearchProblem<'_> {
        SearchProblem::new(grid, CellId(start), CellId(goal)).unwrap()
    }

    #[test]
    fn open_3x3_within_bound() {
        let g = Grid::new(3, 3).unwrap();
        let r = IntegratedHeuristicRunner::new(problem(&g, 0, 8), 1.0, &SearchConfig::default())
            .run_search()
            .found()
            .unwrap();
        assert_eq!(r.path().first(), Some(&CellId(0)));
        assert_eq!(r.path().last(), Some(&CellId(8)));
        assert!(r.path_length() <= 1.5 * 2.0 * SQRT_2 + 1e-9);
        assert!(r.expanded() <= g.len() * 8);
    }

    #[test]
    fn shared_table_reported_once() {
        let g = Grid::new(4, 6).unwrap();
        let r = IntegratedHeuristicRunner::new(problem(&g, 0, 23), 2.0, &SearchConfig::default())
            .run_search()
            .found()
            .unwrap();
        let data = r.multi_heuristic_data(CellId(0)).unwrap();
        assert_eq!(data.g, vec![0.0]);
        assert_eq!(data.back_pointers, vec![None]);
        assert_eq!(data.h.len(), 5);
        assert_eq!(r.weight(), 2.0);
    }

    #[test]
    fn maze_within_bound() {
        let g = Grid::deserialize(
            "1111111\r\n\
             1000001\r\n\
             1011121\r\n\
             1010021\r\n\
             1011111\r\n\
             1111101",
        )
        .unwrap();
        let goal = g.len() as u32 - 1;
        let optimal = SingleHeuristicRunner::new(problem(&g, 0, goal), SearchType::Uniformed, 0.0)
            .run_search()
            .found()
            .unwrap()
            .path_length();
        for w1 in [1.0, 2.0, 5.0] {
            let r = IntegratedHeuristicRunner::new(problem(&g, 0, goal), w1, &SearchConfig::default())
                .run_search()
                .found()
                .unwrap();
            assert!(r.path_length() <= w1 * 1.5 * optimal + 1e-9);
            assert!(r.path_length() >= optimal - 1e-9);
        }
    }

    #[test]
    fn tight_bound_gives_optimal_with_unit_weight() {
        let g = Grid::deserialize("111\r\n121\r\n111").unwrap();
        let config = SearchConfig {
            bound: 1.0,
            ..SearchConfig::default()
        };
        let r = IntegratedHeuristicRunner::new(problem(&g, 0, 8), 1.0, &config)
            .run_search()
            .found()
            .unwrap();
        let optimal = SingleHeuristicRunner::new(problem(&g, 0, 8), SearchType::AStar, 1.0)
            .run_search()
            .found()
            .unwrap();
        assert!((r.path_length() - optimal.path_length()).abs() < 1e-9);
    }
}
