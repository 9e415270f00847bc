use std::fmt;

use pathgrid_core::CellId;

/// Caller-input errors at the search boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A search type name that does not match any algorithm.
    UnknownSearchType(String),
    /// A start or goal id outside the grid.
    UnknownCell { id: CellId, cells: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSearchType(name) => write!(f, "search: unknown search type {name:?}"),
            Self::UnknownCell { id, cells } => {
                write!(f, "search: cell {id} outside grid of {cells} cells")
            }
        }
    }
}

impl std::error::Error for SearchError {}
