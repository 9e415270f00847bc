//! Single-queue best-first search: A*, weighted A* and uniform-cost.

use crate::config::clamp_factor;
use crate::node::{NodeTable, OpenList};
use crate::result::{SearchOutcome, Trace};
use crate::search::SearchType;
use crate::traits::{SearchProblem, SearchRunner};

/// A*, weighted A* and uniform-cost search through one priority formula,
/// `g + weight·h`:
///
/// | type | weight |
/// |---|---|
/// | [`SearchType::AStar`] | 1 |
/// | [`SearchType::WeightedAStar`] | caller's weight, at least 1 |
/// | [`SearchType::Uniformed`] | 0 (`h` is recorded but ignored) |
///
/// Any other `SearchType` passed to [`new`](Self::new) is run as weighted
/// A*.
#[derive(Debug, Clone, Copy)]
pub struct SingleHeuristicRunner<'g> {
    problem: SearchProblem<'g>,
    kind: SearchType,
    weight: f64,
}

impl<'g> SingleHeuristicRunner<'g> {
    pub fn new(problem: SearchProblem<'g>, kind: SearchType, weight: f64) -> Self {
        let weight = match kind {
            SearchType::AStar => 1.0,
            SearchType::Uniformed => 0.0,
            _ => clamp_factor(weight),
        };
        Self {
            problem,
            kind,
            weight,
        }
    }

    /// Effective heuristic multiplier.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl<'g> SearchRunner<'g> for SingleHeuristicRunner<'g> {
    fn search_type(&self) -> SearchType {
        self.kind
    }

    fn run_search(&self) -> SearchOutcome<'g> {
        let p = &self.problem;
        if let Some(outcome) = p.trivial_outcome(self.kind, self.weight) {
            return outcome;
        }
        let grid = p.grid();
        let (start, goal) = (p.start(), p.goal());
        log::debug!(
            "{}: {} -> {} on {}x{} grid, weight {}",
            self.kind,
            start,
            goal,
            grid.length(),
            grid.width(),
            self.weight
        );

        let mut table = NodeTable::new(grid.len());
        let mut open = OpenList::new(grid.len());
        let mut closed = vec![false; grid.len()];
        let mut expanded = 0;

        let h = p.anchor_h(start);
        table.set(start, 0.0, h, None);
        open.insert(start, self.weight * h);

        while let Some(current) = open.pop() {
            if current == goal {
                let Some(path) = table.path_to(goal) else {
                    break;
                };
                let trace = Trace {
                    table,
                    queue: 0,
                    multi: None,
                };
                return SearchOutcome::Found(p.found(self.kind, path, self.weight, expanded, trace));
            }

            closed[current.index()] = true;
            let current_g = table.g(current);
            let Some(cell) = grid.cell(current) else {
                continue;
            };
            log::trace!("{}: expand {} g={:.3}", self.kind, current, current_g);

            for (_, n, cost) in cell.edges() {
                expanded += 1;
                if closed[n.index()] || cost.is_infinite() {
                    continue;
                }
                let tentative_g = current_g + cost;
                if tentative_g >= table.g(n) {
                    continue;
                }
                let h = p.anchor_h(n);
                table.set(n, tentative_g, h, Some(current));
                open.insert(n, tentative_g + self.weight * h);
            }
        }

        p.no_path(self.kind, expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::{CellId, CellType, Coord, Grid, GridBuilder};
    use std::f64::consts::SQRT_2;

    fn run(grid: &Grid, start: u32, goal: u32, kind: SearchType, weight: f64) -> SearchOutcome<'_> {
        let problem = SearchProblem::new(grid, CellId(start), CellId(goal)).unwrap();
        SingleHeuristicRunner::new(problem, kind, weight).run_search()
    }

    #[test]
    fn astar_open_3x3_takes_the_diagonal() {
        let g = Grid::new(3, 3).unwrap();
        let r = run(&g, 0, 8, SearchType::AStar, 5.0).found().unwrap();
        assert_eq!(r.path(), &[CellId(0), CellId(4), CellId(8)]);
        assert!((r.path_length() - 2.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(r.step_count(), 2);
        assert_eq!(r.weight(), 1.0);
        assert!(r.is_in_path(CellId(4)));
        assert!(!r.is_in_path(CellId(1)));
        assert!(r.expanded() <= g.len() * 8);
    }

    #[test]
    fn astar_blocked_diagonal_reports_no_path() {
        for walls in [[(1, 1), (1, 2), (2, 1)], [(1, 1), (0, 1), (1, 0)]] {
            let mut b = GridBuilder::new(3, 3).unwrap();
            for (r, c) in walls {
                b.set_cell_type(Coord::new(r, c), CellType::Blocked);
            }
            let g = b.build();
            let outcome = run(&g, 0, 8, SearchType::AStar, 1.0);
            assert!(!outcome.is_found());
            assert!(outcome.expanded() <= g.len() * 8);
        }
    }

    #[test]
    fn uniformed_records_g_as_f() {
        let g = Grid::new(4, 4).unwrap();
        let r = run(&g, 0, 15, SearchType::Uniformed, 3.0).found().unwrap();
        assert_eq!(r.weight(), 0.0);
        let d = r.cell_search_data(CellId(5));
        assert_eq!(d.f(), d.g);
        assert!((r.path_length() - 3.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn crosses_partially_blocked_band() {
        // Crossing the band of 2s beats walking round through the open column.
        let g = Grid::deserialize("11111\r\n22221\r\n11111").unwrap();
        let a = run(&g, 0, 10, SearchType::AStar, 1.0).found().unwrap();
        let u = run(&g, 0, 10, SearchType::Uniformed, 1.0).found().unwrap();
        assert!((a.path_length() - u.path_length()).abs() < 1e-9);
        // straight down through the band: 1.5 + 1.5
        assert!((a.path_length() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn fast_lane_is_preferred() {
        // Top row is a fast lane; the lane detour beats the direct route.
        let g = Grid::deserialize("aaaaaaa\r\n1111111\r\n1111111").unwrap();
        let start = g.id_at(Coord::new(1, 0)).unwrap();
        let goal = g.id_at(Coord::new(1, 6)).unwrap();
        let r = run(&g, start.0, goal.0, SearchType::Uniformed, 1.0)
            .found()
            .unwrap();
        assert!(r.path_length() < 6.0);
        assert!(r.path().iter().any(|id| g.cell(*id).unwrap().is_fast()));
    }

    #[test]
    fn unreached_cells_get_synthesized_data() {
        let g = Grid::new(1, 10).unwrap();
        let r = run(&g, 0, 3, SearchType::AStar, 1.0).found().unwrap();
        let far = r.cell_search_data(CellId(9));
        assert!(far.g.is_infinite());
        assert_eq!(far.h, 6.0);
        assert_eq!(far.back_pointer, None);
        let on_path = r.cell_search_data(CellId(2));
        assert_eq!(on_path.g, 2.0);
        assert_eq!(on_path.h, 1.0);
        assert_eq!(on_path.back_pointer, Some(CellId(1)));
        assert_eq!(on_path.f(), 3.0);
    }

    #[test]
    fn weighted_weight_is_clamped() {
        let g = Grid::new(2, 2).unwrap();
        let p = SearchProblem::new(&g, CellId(0), CellId(3)).unwrap();
        assert_eq!(
            SingleHeuristicRunner::new(p, SearchType::WeightedAStar, 0.2).weight(),
            1.0
        );
        assert_eq!(
            SingleHeuristicRunner::new(p, SearchType::WeightedAStar, 2.5).weight(),
            2.5
        );
        assert_eq!(SingleHeuristicRunner::new(p, SearchType::AStar, 2.5).weight(), 1.0);
    }
}
