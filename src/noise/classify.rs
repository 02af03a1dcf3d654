//! Nearest-corner tagging for debug overlays.

use serde::{Deserialize, Serialize};

use super::sample::SampleCell;

/// A corner of a grid cell, labelled clockwise from the cell origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Corner `(i, j)`.
    A,
    /// Corner `(i + 1, j)`.
    B,
    /// Corner `(i + 1, j + 1)`.
    C,
    /// Corner `(i, j + 1)`.
    D,
}

impl Corner {
    /// All corners in label order.
    pub fn all() -> [Corner; 4] {
        [Corner::A, Corner::B, Corner::C, Corner::D]
    }

    /// Lowercase label.
    pub fn label(&self) -> char {
        match self {
            Corner::A => 'a',
            Corner::B => 'b',
            Corner::C => 'c',
            Corner::D => 'd',
        }
    }

    /// Corner offset from the cell origin, in cells.
    pub fn offset(&self) -> (u32, u32) {
        match self {
            Corner::A => (0, 0),
            Corner::B => (1, 0),
            Corner::C => (1, 1),
            Corner::D => (0, 1),
        }
    }
}

/// Tags a sample with the quadrant of its cell it falls in.
///
/// Offsets are compared against the integer half of `grid`, so for odd cell
/// sizes the middle row and column belong to the far corners.
pub fn classify(cell: &SampleCell, grid: u32) -> Corner {
    classify_offset(cell.local_x, cell.local_y, grid)
}

/// Same as [`classify`] for a raw local offset.
pub fn classify_offset(local_x: u32, local_y: u32, grid: u32) -> Corner {
    let half = grid / 2;
    match (local_x >= half, local_y >= half) {
        (false, false) => Corner::A,
        (true, false) => Corner::B,
        (true, true) => Corner::C,
        (false, true) => Corner::D,
    }
}
