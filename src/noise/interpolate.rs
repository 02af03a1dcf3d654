//! Sine-eased bilinear interpolation of corner contributions.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use super::sample::Corners;

/// Sine ease curve: `sin(tπ − π/2) / 2 + 0.5`.
///
/// Maps `[0, 1]` onto `[0, 1]` with zero slope at both ends and satisfies
/// `fade(1 − t) = 1 − fade(t)`.
#[inline]
pub fn fade(t: f64) -> f64 {
    (t * PI - FRAC_PI_2).sin() / 2.0 + 0.5
}

/// Faded weights toward each side of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub left: f64,
    pub right: f64,
    pub up: f64,
    pub down: f64,
}

impl BlendWeights {
    /// Computes the weights for a fractional position `(p, q)` in a cell.
    #[inline]
    pub fn at(position: DVec2) -> Self {
        Self {
            left: fade(1.0 - position.x),
            right: fade(position.x),
            up: fade(1.0 - position.y),
            down: fade(position.y),
        }
    }
}

/// Blends corner dot products horizontally, then vertically.
#[inline]
pub fn bilinear_blend(dots: Corners<f64>, weights: BlendWeights) -> f64 {
    let top = dots.a * weights.left + dots.b * weights.right;
    let bottom = dots.d * weights.left + dots.c * weights.right;
    top * weights.up + bottom * weights.down
}

/// Blends corner dot products at `position` and clamps to `[-1, 1]`.
#[inline]
pub fn interpolate(dots: Corners<f64>, position: DVec2) -> f64 {
    bilinear_blend(dots, BlendWeights::at(position)).clamp(-1.0, 1.0)
}
