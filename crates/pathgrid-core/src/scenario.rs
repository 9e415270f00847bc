//! Scenario files: a grid plus its start/goal pair and region markers.
//!
//! ```text
//! (x, y)        start, x = column, y = row
//! (x, y)        goal
//! (x, y)        zero or more region centers
//! ...
//! 0112a...      grid rows
//! ```
//!
//! Every line is CRLF-terminated on output; LF is accepted on input.

use crate::cell::CellId;
use crate::error::GridError;
use crate::geom::Coord;
use crate::grid::Grid;

/// A grid together with the endpoints to search between.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub grid: Grid,
    pub start: CellId,
    pub goal: CellId,
    /// Centers of the generator's partially-blocked regions. Informational.
    pub region_centers: Vec<CellId>,
}

impl Scenario {
    /// Parse the scenario text format.
    pub fn parse(data: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = data.lines().collect();

        let mut coords = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            match parse_xy(line) {
                Some(c) => coords.push(c),
                None if i < 2 => {
                    return Err(GridError::MalformedCoordinate {
                        line: i + 1,
                        text: line.to_string(),
                    });
                }
                None => break,
            }
        }
        if coords.len() < 2 {
            return Err(GridError::MalformedCoordinate {
                line: coords.len() + 1,
                text: String::new(),
            });
        }

        let grid = Grid::from_rows(&lines[coords.len()..])?;
        let mut ids = coords
            .into_iter()
            .map(|c| resolve(&grid, c))
            .collect::<Result<Vec<_>, _>>()?;
        let region_centers = ids.split_off(2);

        Ok(Self {
            start: ids[0],
            goal: ids[1],
            region_centers,
            grid,
        })
    }

    /// Render in the scenario text format.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let endpoints = [self.start, self.goal];
        for id in endpoints.iter().chain(self.region_centers.iter()) {
            if let Some(c) = self.grid.coordinate(*id) {
                out.push_str(&c.to_xy_string());
                out.push_str("\r\n");
            }
        }
        out.push_str(&self.grid.serialize());
        out.push_str("\r\n");
        out
    }
}

fn resolve(grid: &Grid, c: Coord) -> Result<CellId, GridError> {
    grid.id_at(c).ok_or(GridError::CoordinateOutOfBounds {
        coord: c,
        length: grid.length(),
        width: grid.width(),
    })
}

/// `(x, y)` → `Coord { row: y, col: x }`.
fn parse_xy(line: &str) -> Option<Coord> {
    let inner = line.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    let x = x.trim().parse().ok()?;
    let y = y.trim().parse().ok()?;
    Some(Coord::new(y, x))
}
