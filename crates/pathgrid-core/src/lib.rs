//! **pathgrid-core**: weighted 8-connected terrain grids.
//!
//! This crate provides the graph that the `pathgrid-search` algorithms run
//! on: typed terrain cells, an immutable id-addressed [`Grid`] arena with
//! precomputed neighbor links and directed edge costs, and the plain-text
//! grid and scenario formats.

pub mod cell;
pub mod cost;
pub mod error;
pub mod geom;
pub mod grid;
pub mod scenario;

pub use cell::{Cell, CellId, CellType, Direction};
pub use error::GridError;
pub use geom::Coord;
pub use grid::{CellPosition, Grid, GridBuilder};
pub use scenario::Scenario;
