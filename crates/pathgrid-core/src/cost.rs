//! Terrain-dependent edge costs.
//!
//! The cost of an edge depends on the direction (cardinal or diagonal), on
//! whether the two endpoints share a terrain type, and on the terrain and
//! fast-lane flag of the *destination* cell. Edges are therefore directed and
//! in general asymmetric.

use std::f64::consts::SQRT_2;

use crate::cell::{CellType, Direction};

/// Cardinal step between two Unblocked cells.
pub const PERPENDICULAR_UNBLOCKED: f64 = 1.0;
/// Cardinal step between two PartiallyBlocked cells.
pub const PERPENDICULAR_PARTIALLY_BLOCKED: f64 = 2.0;
/// Cardinal step between cells of differing terrain.
pub const PERPENDICULAR_MIXED: f64 = 1.5;
/// Diagonal step between two Unblocked cells.
pub const DIAGONAL_UNBLOCKED: f64 = SQRT_2;
/// Diagonal step between two PartiallyBlocked cells (√8).
pub const DIAGONAL_PARTIALLY_BLOCKED: f64 = 2.0 * SQRT_2;
/// Diagonal step between cells of differing terrain, (√2 + √8) / 2.
pub const DIAGONAL_MIXED: f64 = 1.5 * SQRT_2;
/// Entering a fast-lane cell divides the step cost by this.
pub const FAST_LANE_DIVISOR: f64 = 4.0;

/// Cost of stepping from a `from` cell into a `to` cell along `dir`.
///
/// `to_fast` is the destination's fast-lane flag. Returns `+∞` when the
/// destination is Blocked.
pub fn edge_cost(from: CellType, to: CellType, to_fast: bool, dir: Direction) -> f64 {
    if to.is_blocked() {
        return f64::INFINITY;
    }

    let same = from == to;
    let cost = match (dir.is_perpendicular(), same, from) {
        (true, true, CellType::Unblocked) => PERPENDICULAR_UNBLOCKED,
        (true, true, _) => PERPENDICULAR_PARTIALLY_BLOCKED,
        (true, false, _) => PERPENDICULAR_MIXED,
        (false, true, CellType::Unblocked) => DIAGONAL_UNBLOCKED,
        (false, true, _) => DIAGONAL_PARTIALLY_BLOCKED,
        (false, false, _) => DIAGONAL_MIXED,
    };

    if to_fast { cost / FAST_LANE_DIVISOR } else { cost }
}
