//! Per-pixel sample geometry: owning cell, local offset and corner vectors.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::config::{validate_dimensions, ConfigError};
use super::gradient::GradientField;

/// One value for each corner of a cell.
///
/// Labels go clockwise from the cell origin:
/// `a` at `(i, j)`, `b` at `(i + 1, j)`, `c` at `(i + 1, j + 1)`, `d` at `(i, j + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners<T> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
}

impl<T> Corners<T> {
    /// Applies `f` to every corner.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Corners<U> {
        Corners {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
            d: f(self.d),
        }
    }

    /// Pairs this set with another, corner by corner.
    pub fn zip<U>(self, other: Corners<U>) -> Corners<(T, U)> {
        Corners {
            a: (self.a, other.a),
            b: (self.b, other.b),
            c: (self.c, other.c),
            d: (self.d, other.d),
        }
    }
}

/// Geometry of one output pixel within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCell {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Owning cell column (`x / grid`).
    pub i: u32,
    /// Owning cell row (`y / grid`).
    pub j: u32,
    /// Offset from the cell's left edge, in pixels.
    pub local_x: u32,
    /// Offset from the cell's top edge, in pixels.
    pub local_y: u32,
}

impl SampleCell {
    /// Computes the cell geometry of pixel `(x, y)`.
    ///
    /// `grid` must be non-zero.
    #[inline]
    pub fn new(x: u32, y: u32, grid: u32) -> Self {
        let (i, j) = cell_indices(x, y, grid);
        Self {
            x,
            y,
            i,
            j,
            local_x: x - grid * i,
            local_y: y - grid * j,
        }
    }

    /// Position of the pixel centre within its cell, in fractional-cell units.
    #[inline]
    pub fn position(&self, grid: u32) -> DVec2 {
        fractional_position(self.local_x, self.local_y, grid)
    }
}

/// Returns the `(i, j)` cell that owns pixel `(x, y)`.
#[inline]
pub fn cell_indices(x: u32, y: u32, grid: u32) -> (u32, u32) {
    (x / grid, y / grid)
}

/// Maps a local pixel offset to the pixel centre in `(0, 1)²`.
#[inline]
pub fn fractional_position(local_x: u32, local_y: u32, grid: u32) -> DVec2 {
    let grid = grid as f64;
    DVec2::new(
        (local_x as f64 + 0.5) / grid,
        (local_y as f64 + 0.5) / grid,
    )
}

/// Offsets of a fractional position from each of its cell's corners.
#[inline]
pub fn distance_vectors(position: DVec2) -> Corners<DVec2> {
    let DVec2 { x: p, y: q } = position;
    Corners {
        a: DVec2::new(p, q),
        b: DVec2::new(p - 1.0, q),
        c: DVec2::new(p - 1.0, q - 1.0),
        d: DVec2::new(p, q - 1.0),
    }
}

/// Copies the four gradients surrounding cell `(i, j)`.
///
/// # Panics
/// Panics if `(i + 1, j + 1)` lies outside the field; callers validate
/// dimensions first so this cannot happen for a generated field.
#[inline]
pub fn gradient_lookup(field: &GradientField, i: u32, j: u32) -> Corners<DVec2> {
    Corners {
        a: field.get(i, j),
        b: field.get(i + 1, j),
        c: field.get(i + 1, j + 1),
        d: field.get(i, j + 1),
    }
}

/// Dot product of each distance vector with the gradient at the same corner.
#[inline]
pub fn dot_products(distances: Corners<DVec2>, gradients: Corners<DVec2>) -> Corners<f64> {
    distances.zip(gradients).map(|(d, g)| d.dot(g))
}

/// Builds the geometry for every pixel of a `size × size` output, row-major.
pub fn build_samples(size: u32, grid: u32) -> Result<Vec<SampleCell>, ConfigError> {
    validate_dimensions(size, grid)?;

    let mut samples = Vec::with_capacity(size as usize * size as usize);
    for y in 0..size {
        for x in 0..size {
            samples.push(SampleCell::new(x, y, grid));
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_indices_and_local_offset() {
        let cell = SampleCell::new(13, 7, 5);
        assert_eq!((cell.i, cell.j), (2, 1));
        assert_eq!((cell.local_x, cell.local_y), (3, 2));
    }

    #[test]
    fn test_fractional_position_samples_pixel_centres() {
        let pos = fractional_position(0, 3, 4);
        assert_eq!(pos, DVec2::new(0.125, 0.875));

        // Every position lies strictly inside the cell.
        for local in 0..8 {
            let p = fractional_position(local, local, 8);
            assert!(p.x > 0.0 && p.x < 1.0);
        }
    }

    #[test]
    fn test_distance_vectors_for_quarter_position() {
        let d = distance_vectors(DVec2::new(0.25, 0.25));
        assert_eq!(d.a, DVec2::new(0.25, 0.25));
        assert_eq!(d.b, DVec2::new(-0.75, 0.25));
        assert_eq!(d.c, DVec2::new(-0.75, -0.75));
        assert_eq!(d.d, DVec2::new(0.25, -0.75));
    }

    #[test]
    fn test_gradient_lookup_binds_labels_to_corners() {
        // Corners (0,0)=X, (1,0)=Y, (0,1)=NEG_Y, (1,1)=NEG_X, stored row-major.
        let field = GradientField::from_vectors(
            2,
            2,
            vec![DVec2::X, DVec2::Y, DVec2::NEG_Y, DVec2::NEG_X],
        )
        .unwrap();

        let g = gradient_lookup(&field, 0, 0);
        assert_eq!(g.a, DVec2::X);
        assert_eq!(g.b, DVec2::Y);
        assert_eq!(g.c, DVec2::NEG_X);
        assert_eq!(g.d, DVec2::NEG_Y);
    }

    #[test]
    fn test_dot_products() {
        let distances = distance_vectors(DVec2::new(0.25, 0.25));
        let gradients = Corners {
            a: DVec2::X,
            b: DVec2::Y,
            c: DVec2::NEG_X,
            d: DVec2::NEG_Y,
        };
        let dots = dot_products(distances, gradients);
        assert_eq!(dots.a, 0.25);
        assert_eq!(dots.b, 0.25);
        assert_eq!(dots.c, 0.75);
        assert_eq!(dots.d, 0.75);
    }

    #[test]
    fn test_build_samples_is_row_major() {
        let samples = build_samples(4, 2).unwrap();
        assert_eq!(samples.len(), 16);

        let s = samples[4 + 3];
        assert_eq!((s.x, s.y), (3, 1));
        assert_eq!((s.i, s.j), (1, 0));
        assert_eq!((s.local_x, s.local_y), (1, 1));
    }

    #[test]
    fn test_build_samples_rejects_partial_cells() {
        assert_eq!(
            build_samples(10, 3),
            Err(ConfigError::NotMultiple { size: 10, grid: 3 })
        );
        assert_eq!(build_samples(4, 0), Err(ConfigError::ZeroGrid));
    }

    #[test]
    fn test_last_cell_stays_inside_corner_range() {
        let (size, grid) = (12, 4);
        let corners = size / grid + 1;
        for s in build_samples(size, grid).unwrap() {
            assert!(s.i + 1 < corners && s.j + 1 < corners);
        }
    }
}
