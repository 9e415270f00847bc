//! The [`Cell`] type and its vocabulary: [`CellId`], [`CellType`],
//! [`Direction`].

use std::fmt;

// ---------------------------------------------------------------------------
// CellId
// ---------------------------------------------------------------------------

/// Dense, stable, 0-based row-major cell identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u32);

impl CellId {
    /// Index into id-keyed dense tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CellType
// ---------------------------------------------------------------------------

/// Terrain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellType {
    #[default]
    Unblocked = 1,
    Blocked = 1 << 1,
    PartiallyBlocked = 1 << 2,
}

impl CellType {
    /// Raw flag value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, CellType::Blocked)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight movement directions.
///
/// Cardinals are single bits; each diagonal is the OR of two cardinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Down = 1 << 1,
    Left = 1 << 2,
    Right = 1 << 3,
    UpLeft = 1 | (1 << 2),
    UpRight = 1 | (1 << 3),
    DownLeft = (1 << 1) | (1 << 2),
    DownRight = (1 << 1) | (1 << 3),
}

impl Direction {
    /// All directions, in slot order.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The four cardinal directions.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Raw flag value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Inverse of [`bits`](Self::bits). Returns `None` for values that are
    /// not a single cardinal or a valid cardinal pair.
    pub const fn from_bits(bits: u8) -> Option<Direction> {
        match bits {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            8 => Some(Direction::Right),
            5 => Some(Direction::UpLeft),
            9 => Some(Direction::UpRight),
            6 => Some(Direction::DownLeft),
            10 => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Whether this is a single-bit (cardinal) direction.
    #[inline]
    pub const fn is_perpendicular(self) -> bool {
        (self as u8).is_power_of_two()
    }

    /// Dense index `0..8` for per-direction arrays.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::UpLeft => 4,
            Direction::UpRight => 5,
            Direction::DownLeft => 6,
            Direction::DownRight => 7,
        }
    }

    /// Offset as `(d_row, d_col)`.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        let bits = self as u8;
        let d_row = if bits & 1 != 0 {
            -1
        } else if bits & 2 != 0 {
            1
        } else {
            0
        };
        let d_col = if bits & 4 != 0 {
            -1
        } else if bits & 8 != 0 {
            1
        } else {
            0
        };
        (d_row, d_col)
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A graph node of a [`Grid`](crate::Grid).
///
/// Neighbors are stored as ids into the grid's arena; the grid owns every
/// cell. Costs are per outgoing direction and are finalized by
/// [`GridBuilder::build`](crate::GridBuilder::build).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) cell_type: CellType,
    pub(crate) is_fast: bool,
    pub(crate) neighbors: [Option<CellId>; 8],
    pub(crate) costs: [f64; 8],
}

impl Cell {
    pub(crate) fn new(id: CellId, cell_type: CellType, is_fast: bool) -> Self {
        Self {
            id,
            cell_type,
            // a blocked cell is never a fast lane
            is_fast: is_fast && !cell_type.is_blocked(),
            neighbors: [None; 8],
            costs: [f64::INFINITY; 8],
        }
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn is_fast(&self) -> bool {
        self.is_fast
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.cell_type.is_blocked()
    }

    /// Neighbor in `dir`, or `None` when `dir` leads off the grid.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.slot()]
    }

    /// Cost of moving from this cell into its neighbor in `dir`.
    ///
    /// `+∞` when the neighbor is Blocked or does not exist.
    #[inline]
    pub fn movement_cost(&self, dir: Direction) -> f64 {
        self.costs[dir.slot()]
    }

    /// Registered directions, in slot order.
    pub fn available_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.neighbors[d.slot()].is_some())
    }

    /// Registered cardinal directions, in slot order.
    pub fn available_cardinal_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::CARDINAL
            .into_iter()
            .filter(move |d| self.neighbors[d.slot()].is_some())
    }

    /// `(direction, neighbor, cost)` for every registered direction.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, CellId, f64)> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            self.neighbors[d.slot()].map(|n| (d, n, self.costs[d.slot()]))
        })
    }

    /// Single-character text form: `0`, `1`, `2`, `a` or `b`.
    pub fn serialize(&self) -> char {
        match (self.cell_type, self.is_fast) {
            (CellType::Blocked, _) => '0',
            (CellType::Unblocked, false) => '1',
            (CellType::Unblocked, true) => 'a',
            (CellType::PartiallyBlocked, false) => '2',
            (CellType::PartiallyBlocked, true) => 'b',
        }
    }

    /// Inverse of [`serialize`](Self::serialize): `(type, is_fast)`.
    pub fn parse_char(ch: char) -> Option<(CellType, bool)> {
        match ch {
            '0' => Some((CellType::Blocked, false)),
            '1' => Some((CellType::Unblocked, false)),
            '2' => Some((CellType::PartiallyBlocked, false)),
            'a' => Some((CellType::Unblocked, true)),
            'b' => Some((CellType::PartiallyBlocked, true)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_cardinal_pairs() {
        assert_eq!(
            Direction::UpLeft.bits(),
            Direction::Up.bits() | Direction::Left.bits()
        );
        assert_eq!(
            Direction::DownRight.bits(),
            Direction::Down.bits() | Direction::Right.bits()
        );
        for d in Direction::ALL {
            assert_eq!(Direction::from_bits(d.bits()), Some(d));
        }
        assert_eq!(Direction::from_bits(3), None); // Up | Down
        assert_eq!(Direction::from_bits(0), None);
    }

    #[test]
    fn perpendicular_iff_power_of_two() {
        for d in Direction::CARDINAL {
            assert!(d.is_perpendicular());
        }
        assert!(!Direction::UpLeft.is_perpendicular());
        assert!(!Direction::DownRight.is_perpendicular());
    }

    #[test]
    fn slots_are_dense_and_unique() {
        let mut seen = [false; 8];
        for d in Direction::ALL {
            assert!(!seen[d.slot()]);
            seen[d.slot()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn offsets_and_opposites() {
        assert_eq!(Direction::Up.offset(), (-1, 0));
        assert_eq!(Direction::DownLeft.offset(), (1, -1));
        assert_eq!(Direction::UpRight.offset(), (-1, 1));
        for d in Direction::ALL {
            let (r, c) = d.offset();
            let (or, oc) = d.opposite().offset();
            assert_eq!((r + or, c + oc), (0, 0));
        }
    }

    #[test]
    fn blocked_cells_are_never_fast() {
        let c = Cell::new(CellId(0), CellType::Blocked, true);
        assert!(!c.is_fast());
        assert_eq!(c.serialize(), '0');
    }

    #[test]
    fn char_codes_round_trip() {
        for ch in ['0', '1', '2', 'a', 'b'] {
            let (t, fast) = Cell::parse_char(ch).unwrap();
            assert_eq!(Cell::new(CellId(3), t, fast).serialize(), ch);
        }
        assert_eq!(Cell::parse_char('3'), None);
        assert_eq!(Cell::parse_char('A'), None);
    }

    #[test]
    fn fresh_cell_has_no_edges() {
        let c = Cell::new(CellId(7), CellType::Unblocked, false);
        assert_eq!(c.available_directions().count(), 0);
        assert!(c.movement_cost(Direction::Up).is_infinite());
    }
}
