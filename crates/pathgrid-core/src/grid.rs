//! The [`Grid`] type: an immutable arena of [`Cell`]s with 8-way topology.
//!
//! Terrain is written through a [`GridBuilder`]; [`GridBuilder::build`]
//! classifies every cell's position, links neighbors and runs the cost model
//! once. A built `Grid` has no mutators, so any number of searches may read
//! it concurrently.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, CellId, CellType, Direction};
use crate::cost::edge_cost;
use crate::error::GridError;
use crate::geom::Coord;

// ---------------------------------------------------------------------------
// CellPosition
// ---------------------------------------------------------------------------

/// Where a cell sits relative to the grid boundary.
///
/// A set of edge flags: no flags is an interior cell, one flag a non-corner
/// edge cell, one vertical plus one horizontal flag a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPosition(u8);

impl CellPosition {
    pub const INTERIOR: Self = Self(0);
    pub const LEFT_EDGE: Self = Self(1);
    pub const RIGHT_EDGE: Self = Self(1 << 1);
    pub const TOP_EDGE: Self = Self(1 << 2);
    pub const BOTTOM_EDGE: Self = Self(1 << 3);
    pub const LEFT_TOP_CORNER: Self = Self(1 | (1 << 2));
    pub const LEFT_BOTTOM_CORNER: Self = Self(1 | (1 << 3));
    pub const RIGHT_TOP_CORNER: Self = Self((1 << 1) | (1 << 2));
    pub const RIGHT_BOTTOM_CORNER: Self = Self((1 << 1) | (1 << 3));

    /// Classify `(row, col)` in a `length` × `width` grid by boundary tests.
    pub fn classify(row: usize, col: usize, length: usize, width: usize) -> Self {
        let mut bits = 0;
        if col == 0 {
            bits |= Self::LEFT_EDGE.0;
        }
        if col + 1 == width {
            bits |= Self::RIGHT_EDGE.0;
        }
        if row == 0 {
            bits |= Self::TOP_EDGE.0;
        }
        if row + 1 == length {
            bits |= Self::BOTTOM_EDGE.0;
        }
        Self(bits)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_interior(self) -> bool {
        self.0 == 0
    }

    /// Touches one vertical and one horizontal boundary.
    #[inline]
    pub const fn is_corner(self) -> bool {
        let horizontal = self.0 & (Self::TOP_EDGE.0 | Self::BOTTOM_EDGE.0) != 0;
        let vertical = self.0 & (Self::LEFT_EDGE.0 | Self::RIGHT_EDGE.0) != 0;
        horizontal && vertical
    }

    /// On the boundary but not a corner.
    #[inline]
    pub const fn is_edge(self) -> bool {
        !self.is_interior() && !self.is_corner()
    }

    /// Whether stepping in `dir` stays inside the grid.
    pub const fn allows(self, dir: Direction) -> bool {
        let bits = dir.bits();
        let up = Direction::Up.bits();
        let down = Direction::Down.bits();
        let left = Direction::Left.bits();
        let right = Direction::Right.bits();
        !((bits & up != 0 && self.contains(Self::TOP_EDGE))
            || (bits & down != 0 && self.contains(Self::BOTTOM_EDGE))
            || (bits & left != 0 && self.contains(Self::LEFT_EDGE))
            || (bits & right != 0 && self.contains(Self::RIGHT_EDGE)))
    }
}

// ---------------------------------------------------------------------------
// GridBuilder
// ---------------------------------------------------------------------------

/// Mutable terrain staging area. Consumed by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GridBuilder {
    length: usize,
    width: usize,
    types: Vec<CellType>,
    fast: Vec<bool>,
}

impl GridBuilder {
    /// An all-Unblocked `length` (rows) × `width` (columns) builder.
    ///
    /// Both sides must fit a [`Coord`] component (`i32`) and the cell count
    /// a [`CellId`] (`u32`).
    pub fn new(length: usize, width: usize) -> Result<Self, GridError> {
        let side = i32::MAX as usize;
        let cells = length.checked_mul(width).unwrap_or(0);
        if cells == 0 || cells > u32::MAX as usize || length > side || width > side {
            return Err(GridError::InvalidGridDimensions { length, width });
        }
        Ok(Self {
            length,
            width,
            types: vec![CellType::Unblocked; cells],
            fast: vec![false; cells],
        })
    }

    /// Start from an existing grid's terrain.
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            length: grid.length,
            width: grid.width,
            types: grid.cells.iter().map(|c| c.cell_type).collect(),
            fast: grid.cells.iter().map(|c| c.is_fast).collect(),
        }
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn index(&self, p: Coord) -> Option<usize> {
        if p.in_bounds(self.length, self.width) {
            Some(p.row as usize * self.width + p.col as usize)
        } else {
            None
        }
    }

    /// Terrain at `p`, or `None` if `p` is outside the grid.
    pub fn cell_type(&self, p: Coord) -> Option<CellType> {
        self.index(p).map(|i| self.types[i])
    }

    /// Fast-lane flag at `p`, or `None` if `p` is outside the grid.
    pub fn is_fast(&self, p: Coord) -> Option<bool> {
        self.index(p).map(|i| self.fast[i])
    }

    /// Set the terrain at `p`. No-op if `p` is outside the grid.
    pub fn set_cell_type(&mut self, p: Coord, cell_type: CellType) -> &mut Self {
        if let Some(i) = self.index(p) {
            self.types[i] = cell_type;
        }
        self
    }

    /// Set the fast-lane flag at `p`. No-op if `p` is outside the grid.
    pub fn set_fast(&mut self, p: Coord, fast: bool) -> &mut Self {
        if let Some(i) = self.index(p) {
            self.fast[i] = fast;
        }
        self
    }

    /// Freeze terrain, link neighbors and compute every directed edge cost.
    pub fn build(self) -> Grid {
        let Self {
            length,
            width,
            types,
            fast,
        } = self;

        let mut coords = Vec::with_capacity(types.len());
        let mut cells = Vec::with_capacity(types.len());
        for (i, (&t, &f)) in types.iter().zip(fast.iter()).enumerate() {
            coords.push(Coord::new((i / width) as i32, (i % width) as i32));
            cells.push(Cell::new(CellId(i as u32), t, f));
        }

        for i in 0..cells.len() {
            let p = coords[i];
            let position = CellPosition::classify(p.row as usize, p.col as usize, length, width);
            for dir in Direction::ALL {
                if !position.allows(dir) {
                    continue;
                }
                let (dr, dc) = dir.offset();
                let n = p.shift(dr, dc);
                let ni = n.row as usize * width + n.col as usize;
                let cost = edge_cost(
                    cells[i].cell_type,
                    cells[ni].cell_type,
                    cells[ni].is_fast,
                    dir,
                );
                let cell = &mut cells[i];
                cell.neighbors[dir.slot()] = Some(CellId(ni as u32));
                cell.costs[dir.slot()] = cost;
            }
        }

        let grid = Grid {
            cells,
            coords,
            length,
            width,
        };
        log::debug!(
            "built {}x{} grid: {} blocked, {} partially blocked, {} fast",
            length,
            width,
            grid.count(|c| c.is_blocked()),
            grid.count(|c| c.cell_type == CellType::PartiallyBlocked),
            grid.count(|c| c.is_fast),
        );
        grid
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An immutable, row-major arena of [`Cell`]s.
///
/// `length` is the row count and `width` the column count. Cell ids are
/// dense and row-major: `id = row * width + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    coords: Vec<Coord>,
    length: usize,
    width: usize,
}

impl Grid {
    /// An all-Unblocked grid with no fast lanes.
    pub fn new(length: usize, width: usize) -> Result<Self, GridError> {
        Ok(GridBuilder::new(length, width)?.build())
    }

    /// Parse the CRLF-separated text format (see [`serialize`](Self::serialize)).
    ///
    /// LF-only line endings and a trailing terminator are also accepted.
    pub fn deserialize(data: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = data.lines().collect();
        Self::from_rows(&rows)
    }

    /// Build from one string per row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let length = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut builder = GridBuilder::new(length, width)?;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(GridError::InvalidGridDimensions { length, width });
            }
            for (col, ch) in line.chars().enumerate() {
                let (t, fast) = Cell::parse_char(ch)
                    .ok_or(GridError::MalformedSerializedCell { ch, row, col })?;
                let p = Coord::new(row as i32, col as i32);
                builder.set_cell_type(p, t).set_fast(p, fast);
            }
        }

        Ok(builder.build())
    }

    /// Rows of `{0,1,2,a,b}` joined by CRLF.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + 2 * self.length);
        for (row, chunk) in self.cells.chunks(self.width).enumerate() {
            if row > 0 {
                out.push_str("\r\n");
            }
            out.extend(chunk.iter().map(Cell::serialize));
        }
        out
    }

    /// Number of rows.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: CellId) -> bool {
        id.index() < self.cells.len()
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Cell at `(row, col)`.
    pub fn cell_at(&self, p: Coord) -> Option<&Cell> {
        self.id_at(p).map(|id| &self.cells[id.index()])
    }

    /// Id of the cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn id_at(&self, p: Coord) -> Option<CellId> {
        if p.in_bounds(self.length, self.width) {
            Some(CellId((p.row as usize * self.width + p.col as usize) as u32))
        } else {
            None
        }
    }

    /// `(row, col)` of a cell.
    #[inline]
    pub fn coordinate(&self, id: CellId) -> Option<Coord> {
        self.coords.get(id.index()).copied()
    }

    /// Boundary classification of a cell.
    pub fn position(&self, id: CellId) -> Option<CellPosition> {
        let p = self.coordinate(id)?;
        Some(CellPosition::classify(
            p.row as usize,
            p.col as usize,
            self.length,
            self.width,
        ))
    }

    /// All cells in id order.
    pub fn cells(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Absolute `(d_row, d_col)` between two cells.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the grid.
    #[inline]
    pub fn delta(&self, a: CellId, b: CellId) -> (i64, i64) {
        self.coords[a.index()].abs_delta(self.coords[b.index()])
    }

    /// `floor(sqrt(dx² + dy²))` between two cells.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the grid.
    pub fn euclidean_distance(&self, a: CellId, b: CellId) -> u32 {
        let (dr, dc) = self.delta(a, b);
        ((dr * dr + dc * dc) as f64).sqrt().floor() as u32
    }

    /// `max(|dx|, |dy|)` between two cells.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the grid.
    pub fn chebyshev_distance(&self, a: CellId, b: CellId) -> u32 {
        let (dr, dc) = self.delta(a, b);
        dr.max(dc) as u32
    }

    fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn dir_count(g: &Grid, row: i32, col: i32) -> usize {
        g.cell_at(Coord::new(row, col))
            .unwrap()
            .available_directions()
            .count()
    }

    #[test]
    fn ids_are_row_major() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.len(), 12);
        assert_eq!(g.id_at(Coord::new(0, 0)), Some(CellId(0)));
        assert_eq!(g.id_at(Coord::new(1, 2)), Some(CellId(6)));
        assert_eq!(g.coordinate(CellId(11)), Some(Coord::new(2, 3)));
        assert_eq!(g.id_at(Coord::new(3, 0)), None);
        for (i, c) in g.cells().enumerate() {
            assert_eq!(c.id(), CellId(i as u32));
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(GridError::InvalidGridDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidGridDimensions { .. })
        ));
    }

    #[test]
    fn sides_beyond_coord_range_rejected() {
        let too_long = i32::MAX as usize + 1;
        assert_eq!(
            GridBuilder::new(too_long, 1).unwrap_err(),
            GridError::InvalidGridDimensions {
                length: too_long,
                width: 1
            }
        );
        assert!(matches!(
            GridBuilder::new(1, too_long),
            Err(GridError::InvalidGridDimensions { .. })
        ));
        assert!(matches!(
            GridBuilder::new(1 << 16, 1 << 16),
            Err(GridError::InvalidGridDimensions { .. })
        ));
    }

    #[test]
    fn topology_direction_counts() {
        let (l, w) = (5, 7);
        let g = Grid::new(l, w).unwrap();
        for row in 0..l as i32 {
            for col in 0..w as i32 {
                let on_row_edge = row == 0 || row == l as i32 - 1;
                let on_col_edge = col == 0 || col == w as i32 - 1;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(dir_count(&g, row, col), expected, "at ({row}, {col})");
            }
        }
    }

    #[test]
    fn corner_registers_inward_directions() {
        let g = Grid::new(3, 3).unwrap();
        let corner = g.cell(CellId(8)).unwrap();
        let dirs: Vec<_> = corner.available_directions().collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Left, Direction::UpLeft]);
        let cardinals: Vec<_> = corner.available_cardinal_directions().collect();
        assert_eq!(cardinals, vec![Direction::Up, Direction::Left]);
        assert_eq!(corner.neighbor(Direction::UpLeft), Some(CellId(4)));
        assert_eq!(corner.neighbor(Direction::Down), None);
    }

    #[test]
    fn neighbors_are_symmetric() {
        let g = Grid::new(4, 5).unwrap();
        for c in g.cells() {
            for (dir, n, _) in c.edges() {
                let back = g.cell(n).unwrap().neighbor(dir.opposite());
                assert_eq!(back, Some(c.id()));
            }
        }
    }

    #[test]
    fn positions_classify() {
        let g = Grid::new(3, 3).unwrap();
        assert_eq!(g.position(CellId(0)), Some(CellPosition::LEFT_TOP_CORNER));
        assert_eq!(g.position(CellId(2)), Some(CellPosition::RIGHT_TOP_CORNER));
        assert_eq!(g.position(CellId(6)), Some(CellPosition::LEFT_BOTTOM_CORNER));
        assert_eq!(g.position(CellId(8)), Some(CellPosition::RIGHT_BOTTOM_CORNER));
        assert_eq!(g.position(CellId(1)), Some(CellPosition::TOP_EDGE));
        assert_eq!(g.position(CellId(4)), Some(CellPosition::INTERIOR));
        assert!(g.position(CellId(0)).unwrap().is_corner());
        assert!(g.position(CellId(3)).unwrap().is_edge());
        assert!(g.position(CellId(4)).unwrap().is_interior());
    }

    #[test]
    fn single_row_grid_links_horizontally() {
        let g = Grid::new(1, 3).unwrap();
        let mid = g.cell(CellId(1)).unwrap();
        let dirs: Vec<_> = mid.available_directions().collect();
        assert_eq!(dirs, vec![Direction::Left, Direction::Right]);
    }

    #[test]
    fn costs_follow_destination() {
        let mut b = GridBuilder::new(3, 3).unwrap();
        b.set_cell_type(Coord::new(0, 1), CellType::Blocked)
            .set_cell_type(Coord::new(1, 0), CellType::PartiallyBlocked)
            .set_fast(Coord::new(1, 1), true);
        let g = b.build();

        let origin = g.cell(CellId(0)).unwrap();
        assert!(origin.movement_cost(Direction::Right).is_infinite());
        assert_eq!(origin.movement_cost(Direction::Down), 1.5);
        assert!((origin.movement_cost(Direction::DownRight) - SQRT_2 / 4.0).abs() < 1e-12);

        // asymmetric: leaving the fast cell is not discounted
        let center = g.cell(CellId(4)).unwrap();
        assert!((center.movement_cost(Direction::UpLeft) - SQRT_2).abs() < 1e-12);
        // every edge into the blocked cell is infinite
        for c in g.cells() {
            for (_, n, cost) in c.edges() {
                assert_eq!(cost.is_infinite(), n == CellId(1));
            }
        }
    }

    #[test]
    fn distances_floor() {
        let g = Grid::new(10, 10).unwrap();
        let a = g.id_at(Coord::new(0, 0)).unwrap();
        let b = g.id_at(Coord::new(3, 4)).unwrap();
        let c = g.id_at(Coord::new(2, 2)).unwrap();
        assert_eq!(g.euclidean_distance(a, b), 5);
        assert_eq!(g.chebyshev_distance(a, b), 4);
        // sqrt(8) = 2.83
        assert_eq!(g.euclidean_distance(a, c), 2);
        assert_eq!(g.chebyshev_distance(b, a), 4);
        assert_eq!(g.euclidean_distance(a, a), 0);
    }

    #[test]
    fn serialize_format() {
        let mut b = GridBuilder::new(2, 3).unwrap();
        b.set_cell_type(Coord::new(0, 0), CellType::Blocked)
            .set_cell_type(Coord::new(0, 2), CellType::PartiallyBlocked)
            .set_fast(Coord::new(0, 2), true)
            .set_fast(Coord::new(1, 1), true)
            .set_cell_type(Coord::new(1, 2), CellType::PartiallyBlocked);
        let g = b.build();
        assert_eq!(g.serialize(), "01b\r\n1a2");
        assert_eq!(g.to_string(), g.serialize());
    }

    #[test]
    fn deserialize_round_trip() {
        let text = "1102a\r\nb0112\r\n2211a";
        let g: Grid = text.parse().unwrap();
        assert_eq!(g.length(), 3);
        assert_eq!(g.width(), 5);
        assert_eq!(g.serialize(), text);

        let back = Grid::deserialize(&g.serialize()).unwrap();
        assert_eq!(back.length(), g.length());
        assert_eq!(back.width(), g.width());
        for (a, b) in g.cells().zip(back.cells()) {
            assert_eq!(a.cell_type(), b.cell_type());
            assert_eq!(a.is_fast(), b.is_fast());
        }
    }

    #[test]
    fn deserialize_tolerates_line_endings() {
        let crlf = Grid::deserialize("12\r\n21\r\n").unwrap();
        let lf = Grid::deserialize("12\n21").unwrap();
        assert_eq!(crlf, lf);
        assert_eq!(crlf.length(), 2);
    }

    #[test]
    fn deserialize_rejects_bad_input() {
        assert_eq!(
            Grid::deserialize("11\r\n1x"),
            Err(GridError::MalformedSerializedCell {
                ch: 'x',
                row: 1,
                col: 1
            })
        );
        assert!(matches!(
            Grid::deserialize("111\r\n11"),
            Err(GridError::InvalidGridDimensions { .. })
        ));
        assert!(matches!(
            Grid::deserialize(""),
            Err(GridError::InvalidGridDimensions { .. })
        ));
    }

    #[test]
    fn builder_from_grid_preserves_terrain() {
        let g = Grid::deserialize("1a\r\n20").unwrap();
        let mut b = GridBuilder::from_grid(&g);
        assert_eq!(b.cell_type(Coord::new(1, 1)), Some(CellType::Blocked));
        assert_eq!(b.is_fast(Coord::new(0, 1)), Some(true));
        b.set_cell_type(Coord::new(0, 0), CellType::Blocked);
        // out of range writes are ignored
        b.set_fast(Coord::new(9, 9), true);
        assert_eq!(b.build().serialize(), "0a\r\n20");
    }

    #[test]
    fn grid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grid>();
    }
}
