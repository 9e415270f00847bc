use std::fmt;

use crate::geom::Coord;

/// Errors that can occur when building or parsing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A dimension is zero, or rows have inconsistent widths.
    InvalidGridDimensions { length: usize, width: usize },
    /// A character outside the `{0,1,2,a,b}` alphabet.
    MalformedSerializedCell { ch: char, row: usize, col: usize },
    /// A scenario line that should hold an `(x, y)` coordinate.
    MalformedCoordinate { line: usize, text: String },
    /// A scenario coordinate outside the grid.
    CoordinateOutOfBounds { coord: Coord, length: usize, width: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridDimensions { length, width } => {
                write!(f, "grid: invalid dimensions {length}x{width}")
            }
            Self::MalformedSerializedCell { ch, row, col } => {
                write!(
                    f,
                    "grid: malformed cell \u{201c}{ch}\u{201d} at row {row}, column {col}"
                )
            }
            Self::MalformedCoordinate { line, text } => {
                write!(f, "scenario: line {line} is not a coordinate: {text:?}")
            }
            Self::CoordinateOutOfBounds {
                coord,
                length,
                width,
            } => write!(
                f,
                "scenario: coordinate {} outside {length}x{width} grid",
                coord.to_xy_string()
            ),
        }
    }
}

impl std::error::Error for GridError {}
