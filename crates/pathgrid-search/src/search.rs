use std::fmt;
use std::str::FromStr;

use pathgrid_core::{CellId, Grid};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::integrated::IntegratedHeuristicRunner;
use crate::result::SearchOutcome;
use crate::sequential::SequentialHeuristicRunner;
use crate::single::SingleHeuristicRunner;
use crate::traits::{SearchProblem, SearchRunner};

/// The search algorithms the facade can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchType {
    AStar,
    WeightedAStar,
    Uniformed,
    SequentialHeuristic,
    IntegratedHeuristic,
}

impl SearchType {
    pub const ALL: [SearchType; 5] = [
        SearchType::AStar,
        SearchType::WeightedAStar,
        SearchType::Uniformed,
        SearchType::SequentialHeuristic,
        SearchType::IntegratedHeuristic,
    ];

    /// Canonical name, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::AStar => "AStar",
            Self::WeightedAStar => "WeightedAStar",
            Self::Uniformed => "Uniformed",
            Self::SequentialHeuristic => "SequentialHeuristic",
            Self::IntegratedHeuristic => "IntegratedHeuristic",
        }
    }

    /// Whether the algorithm runs an anchor plus inadmissible queues.
    #[inline]
    pub fn is_multi_heuristic(self) -> bool {
        matches!(self, Self::SequentialHeuristic | Self::IntegratedHeuristic)
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, and a few short
    /// aliases are accepted (`astar`, `wastar`, `ucs`, `imha`, `smha`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '*'))
            .flat_map(char::to_lowercase)
            .collect();
        let kind = match key.as_str() {
            "astar" | "a" => Self::AStar,
            "weightedastar" | "weighteda" | "weighted" | "wastar" | "wa" => Self::WeightedAStar,
            "uniformed" | "uniform" | "uniformcost" | "ucs" | "dijkstra" => Self::Uniformed,
            "sequentialheuristic" | "sequential" | "imha" | "imhastar" => {
                Self::SequentialHeuristic
            }
            "integratedheuristic" | "integrated" | "smha" | "smhastar" => {
                Self::IntegratedHeuristic
            }
            _ => return Err(SearchError::UnknownSearchType(s.to_string())),
        };
        Ok(kind)
    }
}

/// Entry point: validates a start/goal pair on a grid and runs any
/// [`SearchType`] over it.
///
/// ```
/// use pathgrid_core::{CellId, Grid};
/// use pathgrid_search::{Search, SearchType};
///
/// let grid = Grid::new(3, 3)?;
/// let search = Search::new(&grid, CellId(0), CellId(8))?;
/// let result = search.initiate_search(SearchType::AStar, 1.0).into_result()?;
/// assert_eq!(result.path(), &[CellId(0), CellId(4), CellId(8)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Search<'g> {
    problem: SearchProblem<'g>,
    config: SearchConfig,
}

impl<'g> Search<'g> {
    /// Fails with [`SearchError::UnknownCell`] if either id is outside
    /// `grid`.
    pub fn new(grid: &'g Grid, start: CellId, goal: CellId) -> Result<Self, SearchError> {
        Ok(Self {
            problem: SearchProblem::new(grid, start, goal)?,
            config: SearchConfig::default(),
        })
    }

    /// Replace the multi-heuristic tuning.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn problem(&self) -> &SearchProblem<'g> {
        &self.problem
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The runner for `kind`. `weight` is ignored by AStar and Uniformed.
    pub fn runner(&self, kind: SearchType, weight: f64) -> Box<dyn SearchRunner<'g> + 'g> {
        match kind {
            SearchType::AStar | SearchType::WeightedAStar | SearchType::Uniformed => {
                Box::new(SingleHeuristicRunner::new(self.problem, kind, weight))
            }
            SearchType::SequentialHeuristic => Box::new(SequentialHeuristicRunner::new(
                self.problem,
                weight,
                &self.config,
            )),
            SearchType::IntegratedHeuristic => Box::new(IntegratedHeuristicRunner::new(
                self.problem,
                weight,
                &self.config,
            )),
        }
    }

    /// Run `kind` to completion.
    pub fn initiate_search(&self, kind: SearchType, weight: f64) -> SearchOutcome<'g> {
        self.runner(kind, weight).run_search()
    }
}
