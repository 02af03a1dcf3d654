//! Random unit gradient vectors assigned to grid corners.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::NoiseError;

/// A matrix of unit gradient vectors, one per grid corner.
///
/// Corners are addressed as `(i, j)` with `i` along x and `j` along y.
/// Vectors are stored row-major (`j * corners_x + i`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientFieldData")]
pub struct GradientField {
    corners_x: u32,
    corners_y: u32,
    vectors: Vec<DVec2>,
}

/// Unchecked serialized form of [`GradientField`].
#[derive(Deserialize)]
struct GradientFieldData {
    corners_x: u32,
    corners_y: u32,
    vectors: Vec<DVec2>,
}

impl TryFrom<GradientFieldData> for GradientField {
    type Error = NoiseError;

    fn try_from(data: GradientFieldData) -> Result<Self, Self::Error> {
        Self::from_vectors(data.corners_x, data.corners_y, data.vectors)
    }
}

impl GradientField {
    /// Draws a gradient field from the given random source.
    ///
    /// Each component is drawn uniformly from `[-1, 1]` and the pair is then
    /// scaled to unit length. The draw is not rejection-sampled onto the unit
    /// disc, so directions near the square's diagonals are slightly favoured.
    /// A `(0, 0)` draw has no direction and is drawn again.
    pub fn generate<R: Rng>(corners_x: u32, corners_y: u32, rng: &mut R) -> Self {
        Self::from_draws(corners_x, corners_y, || {
            (rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0))
        })
    }

    /// Builds a gradient field from an arbitrary source of component pairs.
    ///
    /// Corners are visited column by column (`i` outer, `j` inner), which
    /// fixes the order in which `draw` is consumed.
    pub fn from_draws<F>(corners_x: u32, corners_y: u32, mut draw: F) -> Self
    where
        F: FnMut() -> (f64, f64),
    {
        let len = corners_x as usize * corners_y as usize;
        let mut vectors = vec![DVec2::ZERO; len];
        let mut redraws = 0usize;

        for i in 0..corners_x {
            for j in 0..corners_y {
                let gradient = loop {
                    let (x, y) = draw();
                    match unit_from_components(x, y) {
                        Some(v) => break v,
                        None => {
                            redraws += 1;
                            tracing::trace!(i, j, "degenerate gradient draw, drawing again");
                        }
                    }
                };
                vectors[j as usize * corners_x as usize + i as usize] = gradient;
            }
        }

        if redraws > 0 {
            tracing::debug!(redraws, "recovered degenerate gradient draws");
        }

        Self {
            corners_x,
            corners_y,
            vectors,
        }
    }

    /// Wraps caller-supplied gradients, stored row-major.
    ///
    /// The vectors are used as given; they are not normalized.
    pub fn from_vectors(
        corners_x: u32,
        corners_y: u32,
        vectors: Vec<DVec2>,
    ) -> Result<Self, NoiseError> {
        let expected = corners_x as usize * corners_y as usize;
        if vectors.len() != expected {
            return Err(NoiseError::VectorCount {
                expected,
                found: vectors.len(),
            });
        }
        Ok(Self {
            corners_x,
            corners_y,
            vectors,
        })
    }

    /// Number of corners along x.
    pub fn corners_x(&self) -> u32 {
        self.corners_x
    }

    /// Number of corners along y.
    pub fn corners_y(&self) -> u32 {
        self.corners_y
    }

    /// Returns the gradient at corner `(i, j)`.
    ///
    /// # Panics
    /// Panics if the corner lies outside the field.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> DVec2 {
        assert!(
            i < self.corners_x && j < self.corners_y,
            "corner ({}, {}) outside {}x{} gradient field",
            i,
            j,
            self.corners_x,
            self.corners_y
        );
        self.vectors[self.index(i, j)]
    }

    /// Returns the gradient at corner `(i, j)`, or `None` outside the field.
    pub fn try_get(&self, i: u32, j: u32) -> Option<DVec2> {
        if i < self.corners_x && j < self.corners_y {
            Some(self.vectors[self.index(i, j)])
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> usize {
        j as usize * self.corners_x as usize + i as usize
    }

    /// All gradients in row-major order.
    pub fn vectors(&self) -> &[DVec2] {
        &self.vectors
    }

    /// Iterates over `(i, j, gradient)` for every corner.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, DVec2)> + '_ {
        let cx = self.corners_x.max(1) as usize;
        self.vectors
            .iter()
            .enumerate()
            .map(move |(idx, &v)| ((idx % cx) as u32, (idx / cx) as u32, v))
    }
}

/// Scales `(x, y)` to unit length.
///
/// Returns `None` for the zero vector, for non-finite input, and for any
/// result that does not come out within `1e-9` of unit length.
fn unit_from_components(x: f64, y: f64) -> Option<DVec2> {
    if x == 0.0 && y == 0.0 {
        return None;
    }
    // hypot avoids squaring tiny components into subnormals.
    let magnitude = x.hypot(y);
    let unit = DVec2::new(x / magnitude, y / magnitude);
    (unit.is_finite() && (unit.length() - 1.0).abs() < UNIT_TOLERANCE).then_some(unit)
}

const UNIT_TOLERANCE: f64 = 1e-9;
