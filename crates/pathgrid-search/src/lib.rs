//! **pathgrid-search**: best-first search over [`pathgrid_core::Grid`].
//!
//! Algorithms:
//!
//! - **A\*** with the Chebyshev anchor heuristic
//! - **Weighted A\***, priority `g + w·h`
//! - **Uniform-cost** search, priority `g`
//! - **Sequential multi-heuristic A\*** (independent queues)
//! - **Integrated multi-heuristic A\*** (shared `g`/backpointers)
//!
//! Everything is driven through [`Search`], which validates the endpoints
//! and picks a [`SearchRunner`] for the requested [`SearchType`]. Runners
//! borrow the grid immutably and keep all scratch state per call.
//!
//! # Runners
//!
//! | Runner | [`SearchType`]s |
//! |---|---|
//! | [`SingleHeuristicRunner`] | `AStar`, `WeightedAStar`, `Uniformed` |
//! | [`SequentialHeuristicRunner`] | `SequentialHeuristic` |
//! | [`IntegratedHeuristicRunner`] | `IntegratedHeuristic` |

mod config;
mod error;
mod heap;
mod heuristics;
mod integrated;
mod node;
mod result;
mod search;
mod sequential;
mod single;
mod traits;

pub use config::{ANCHOR_HEURISTIC, DEFAULT_BOUND, SearchConfig};
pub use error::SearchError;
pub use heap::BinaryMinHeap;
pub use heuristics::{HeuristicKind, chebyshev, euclidean, manhattan, octile, squared_euclidean};
pub use integrated::IntegratedHeuristicRunner;
pub use result::{
    CellSearchData, MultiHeuristicCellSearchData, NoPathFound, SearchOutcome, SearchResult,
};
pub use search::{Search, SearchType};
pub use sequential::SequentialHeuristicRunner;
pub use single::SingleHeuristicRunner;
pub use traits::{SearchProblem, SearchRunner};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use pathgrid_core::{CellId, Grid};

    #[test]
    fn config_round_trip() {
        let config = SearchConfig {
            bound: 2.5,
            heuristics: vec![HeuristicKind::Octile, HeuristicKind::Manhattan],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn search_type_round_trip() {
        for kind in SearchType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: SearchType = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }

    #[test]
    fn cell_search_data_round_trip() {
        let grid = Grid::new(3, 3).unwrap();
        let result = Search::new(&grid, CellId(0), CellId(8))
            .unwrap()
            .initiate_search(SearchType::AStar, 1.0)
            .found()
            .unwrap();
        let data = result.cell_search_data(CellId(4));
        let json = serde_json::to_string(&data).unwrap();
        let back: CellSearchData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }
}
