use std::f64::consts::SQRT_2;

use pathgrid_core::{CellId, Grid};

/// A distance estimator from a cell to the goal.
///
/// [`Chebyshev`](Self::Chebyshev) is the anchor: with the cost model's
/// minimum step cost of 1 it never overestimates on grids without fast
/// lanes. The others are used by the multi-heuristic runners as
/// inadmissible guides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    Chebyshev,
    Euclidean,
    SquaredEuclidean,
    Manhattan,
    Octile,
}

impl HeuristicKind {
    /// Estimate the cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, grid: &Grid, from: CellId, to: CellId) -> f64 {
        match self {
            Self::Chebyshev => chebyshev(grid, from, to),
            Self::Euclidean => euclidean(grid, from, to),
            Self::SquaredEuclidean => squared_euclidean(grid, from, to),
            Self::Manhattan => manhattan(grid, from, to),
            Self::Octile => octile(grid, from, to),
        }
    }
}

/// Chebyshev (L∞) distance.
#[inline]
pub fn chebyshev(grid: &Grid, a: CellId, b: CellId) -> f64 {
    f64::from(grid.chebyshev_distance(a, b))
}

/// Floored Euclidean (L2) distance.
#[inline]
pub fn euclidean(grid: &Grid, a: CellId, b: CellId) -> f64 {
    f64::from(grid.euclidean_distance(a, b))
}

/// Squared Euclidean distance.
#[inline]
pub fn squared_euclidean(grid: &Grid, a: CellId, b: CellId) -> f64 {
    let (dr, dc) = grid.delta(a, b);
    (dr * dr + dc * dc) as f64
}

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan(grid: &Grid, a: CellId, b: CellId) -> f64 {
    let (dr, dc) = grid.delta(a, b);
    (dr + dc) as f64
}

/// Octile distance: diagonal steps at √2, the rest straight.
#[inline]
pub fn octile(grid: &Grid, a: CellId, b: CellId) -> f64 {
    let (dr, dc) = grid.delta(a, b);
    let (lo, hi) = if dr < dc { (dr, dc) } else { (dc, dr) };
    (hi - lo) as f64 + SQRT_2 * lo as f64
}
