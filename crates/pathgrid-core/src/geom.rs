//! Grid coordinates: [`Coord`].
//!
//! Rows grow downward and columns grow right. The scenario text format
//! writes coordinates as `(x, y)`, i.e. `(col, row)`; see
//! [`Coord::to_xy_string`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A signed `(row, col)` grid coordinate.
///
/// Signed so that neighbor offsets can step off the grid and be rejected by
/// a bounds check instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (d_row, d_col).
    #[inline]
    pub const fn shift(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Whether the coordinate lies inside a `length` × `width` grid.
    #[inline]
    pub fn in_bounds(self, length: usize, width: usize) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as usize) < length && (self.col as usize) < width
    }

    /// Absolute per-axis deltas to `other` as `(d_row, d_col)`.
    #[inline]
    pub fn abs_delta(self, other: Coord) -> (i64, i64) {
        (
            (i64::from(self.row) - i64::from(other.row)).abs(),
            (i64::from(self.col) - i64::from(other.col)).abs(),
        )
    }

    /// Render as `(x, y)` = `(col, row)`, the scenario-file convention.
    pub fn to_xy_string(self) -> String {
        format!("({}, {})", self.col, self.row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}
