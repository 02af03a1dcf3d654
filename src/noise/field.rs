//! Noise field assembly: gradients, samples and interpolation in one pass.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classify::{classify, Corner};
use super::config::{validate_dimensions, ConfigError, NoiseConfig};
use super::gradient::GradientField;
use super::interpolate::interpolate;
use super::sample::{distance_vectors, dot_products, gradient_lookup, SampleCell};

/// Errors that can occur during noise generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Gradient field is {found_x}x{found_y} corners, expected {expected_x}x{expected_y}")]
    GradientShape {
        expected_x: u32,
        expected_y: u32,
        found_x: u32,
        found_y: u32,
    },
    #[error("Expected {expected} gradient vectors, found {found}")]
    VectorCount { expected: usize, found: usize },
}

/// A square matrix of noise values in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseField {
    /// Side length in pixels.
    pub size: u32,
    /// Values stored in row-major order.
    pub values: Vec<f64>,
}

impl NoiseField {
    /// Number of values a field of this size holds (`size * size`).
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Returns `(expected, found)` when `values` does not hold `size * size` entries.
    pub fn len_mismatch(&self) -> Option<(usize, usize)> {
        let expected = self.expected_len();
        (self.values.len() != expected).then_some((expected, self.values.len()))
    }

    /// Returns the value at pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[pixel_index(x, y, self.size)]
    }

    /// Iterates over the rows of the field.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size.max(1) as usize)
    }

    /// Returns the field as nested vectors indexed `[x][y]`.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.size)
            .map(|x| (0..self.size).map(|y| self.get(x, y)).collect())
            .collect()
    }

    /// Computes the min and max value in the field.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::MAX, f64::MIN), |(min, max), &v| (min.min(v), max.max(v)))
    }
}

/// Output of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNoise {
    /// Side length of one grid cell, in pixels.
    pub grid: u32,
    /// The clamped noise values.
    pub field: NoiseField,
    /// The gradients the field was interpolated from.
    pub gradients: GradientField,
    /// Nearest-corner tag per pixel, row-major, when classification was requested.
    pub corners: Option<Vec<Corner>>,
}

impl GeneratedNoise {
    /// Side length of the field in pixels.
    pub fn size(&self) -> u32 {
        self.field.size
    }

    /// Returns the corner tag of pixel `(x, y)`, if classification ran.
    pub fn corner(&self, x: u32, y: u32) -> Option<Corner> {
        self.corners
            .as_ref()
            .map(|tags| tags[pixel_index(x, y, self.field.size)])
    }
}

/// Row-major index of pixel `(x, y)` in a `size`-wide buffer.
#[inline]
pub(crate) fn pixel_index(x: u32, y: u32, size: u32) -> usize {
    y as usize * size as usize + x as usize
}

/// Generates a `size × size` noise field from the given random source.
///
/// Dimensions are validated before anything is drawn or allocated.
pub fn generate<R: Rng>(size: u32, grid: u32, rng: &mut R) -> Result<GeneratedNoise, NoiseError> {
    generate_with_options(size, grid, rng, false)
}

/// Like [`generate`], optionally tagging every pixel with its nearest corner.
pub fn generate_with_options<R: Rng>(
    size: u32,
    grid: u32,
    rng: &mut R,
    classify_corners: bool,
) -> Result<GeneratedNoise, NoiseError> {
    validate_dimensions(size, grid)?;

    let corners = size / grid + 1;
    let start = Instant::now();
    let gradients = GradientField::generate(corners, corners, rng);
    tracing::debug!(corners, elapsed = ?start.elapsed(), "gradient field drawn");

    generate_from_gradients(size, grid, gradients, classify_corners)
}

/// Generates a noise field from a seeded configuration.
pub fn generate_with_config(config: &NoiseConfig) -> Result<GeneratedNoise, NoiseError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    generate_with_options(config.size, config.grid, &mut rng, config.classify_corners)
}

/// Interpolates a noise field from an existing gradient field.
///
/// The field must have exactly `size / grid + 1` corners along each axis.
pub fn generate_from_gradients(
    size: u32,
    grid: u32,
    gradients: GradientField,
    classify_corners: bool,
) -> Result<GeneratedNoise, NoiseError> {
    validate_dimensions(size, grid)?;

    let corners = size / grid + 1;
    if gradients.corners_x() != corners || gradients.corners_y() != corners {
        return Err(NoiseError::GradientShape {
            expected_x: corners,
            expected_y: corners,
            found_x: gradients.corners_x(),
            found_y: gradients.corners_y(),
        });
    }

    let start = Instant::now();
    let width = size as usize;
    let mut values = vec![0.0f64; width * width];

    values.par_iter_mut().enumerate().for_each(|(idx, value)| {
        let (x, y) = ((idx % width) as u32, (idx / width) as u32);
        *value = sample_value(&SampleCell::new(x, y, grid), &gradients, grid);
    });

    let corner_tags = classify_corners.then(|| {
        (0..width * width)
            .into_par_iter()
            .map(|idx| {
                let (x, y) = ((idx % width) as u32, (idx / width) as u32);
                classify(&SampleCell::new(x, y, grid), grid)
            })
            .collect()
    });

    tracing::debug!(size, grid, elapsed = ?start.elapsed(), "noise field interpolated");

    Ok(GeneratedNoise {
        grid,
        field: NoiseField { size, values },
        gradients,
        corners: corner_tags,
    })
}

/// Computes the clamped noise value of a single sample.
pub fn sample_value(cell: &SampleCell, gradients: &GradientField, grid: u32) -> f64 {
    let position = cell.position(grid);
    let dots = dot_products(
        distance_vectors(position),
        gradient_lookup(gradients, cell.i, cell.j),
    );
    interpolate(dots, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn golden_gradients() -> GradientField {
        // Row-major: (0,0)=A, (1,0)=B, (0,1)=D, (1,1)=C.
        GradientField::from_vectors(
            2,
            2,
            vec![
                DVec2::new(1.0, 0.0),
                DVec2::new(0.0, 1.0),
                DVec2::new(0.0, -1.0),
                DVec2::new(-1.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_golden_single_cell() {
        let out = generate_from_gradients(2, 2, golden_gradients(), false).unwrap();
        let expected = 0.323_223_304_703_363_1;
        assert!(
            (out.field.get(0, 0) - expected).abs() < 1e-12,
            "pixel (0,0) = {}",
            out.field.get(0, 0)
        );
        // The forced gradients are symmetric about the cell diagonal.
        assert!((out.field.get(1, 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_values_in_range() {
        for (size, grid) in [(8, 1), (16, 4), (30, 5), (64, 64), (7, 7)] {
            let mut rng = ChaCha8Rng::seed_from_u64(size as u64 * 31 + grid as u64);
            let out = generate(size, grid, &mut rng).unwrap();
            assert_eq!(out.field.values.len(), (size * size) as usize);
            for &v in &out.field.values {
                assert!((-1.0..=1.0).contains(&v), "value {} out of range", v);
            }
        }
    }

    #[test]
    fn test_rejects_non_multiple() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate(10, 3, &mut rng).unwrap_err();
        assert_eq!(err, NoiseError::Config(ConfigError::NotMultiple { size: 10, grid: 3 }));
    }

    #[test]
    fn test_rejection_consumes_no_randomness() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(generate(10, 3, &mut rng).is_err());
        let after_error = generate(8, 4, &mut rng).unwrap();
        let fresh = generate(8, 4, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(after_error.field, fresh.field);
    }

    #[test]
    fn test_gradient_shape_mismatch() {
        let err = generate_from_gradients(4, 2, golden_gradients(), false).unwrap_err();
        assert_eq!(
            err,
            NoiseError::GradientShape { expected_x: 3, expected_y: 3, found_x: 2, found_y: 2 }
        );
    }

    #[test]
    fn test_config_determinism() {
        let config = NoiseConfig::new(32, 8).seed(77);
        let a = generate_with_config(&config).unwrap();
        let b = generate_with_config(&config).unwrap();
        assert_eq!(a.field, b.field);
        assert_eq!(a.gradients, b.gradients);
    }

    #[test]
    fn test_uniform_gradients_vary_only_along_x() {
        // With gradients pointing along +x everywhere, the value depends only on p.
        let field = GradientField::from_vectors(3, 3, vec![DVec2::X; 9]).unwrap();
        let out = generate_from_gradients(4, 2, field, false).unwrap();
        for y in 0..4 {
            assert_eq!(out.field.get(0, y), out.field.get(0, 0));
            assert_eq!(out.field.get(2, y), out.field.get(0, 0));
        }
    }

    #[test]
    fn test_classification_optional() {
        let config = NoiseConfig::new(8, 4).seed(3);
        let plain = generate_with_config(&config).unwrap();
        assert!(plain.corners.is_none());
        assert_eq!(plain.corner(0, 0), None);

        let tagged = generate_with_config(&config.clone().classify_corners(true)).unwrap();
        assert_eq!(tagged.corner(0, 0), Some(Corner::A));
        assert_eq!(tagged.corner(3, 0), Some(Corner::B));
        assert_eq!(tagged.corner(7, 7), Some(Corner::C));
        assert_eq!(tagged.corner(1, 6), Some(Corner::D));
        assert_eq!(plain.field, tagged.field);
    }

    #[test]
    fn test_nested_layout_and_rows() {
        let out = generate_with_config(&NoiseConfig::new(4, 2).seed(11)).unwrap();
        let nested = out.field.to_nested();
        assert_eq!(nested.len(), 4);
        assert_eq!(nested[3][1], out.field.get(3, 1));

        let rows: Vec<&[f64]> = out.field.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][3], out.field.get(3, 1));
    }

    #[test]
    fn test_len_mismatch() {
        let short = NoiseField { size: 4, values: vec![0.0; 3] };
        assert_eq!(short.len_mismatch(), Some((16, 3)));

        let full = NoiseField { size: 2, values: vec![0.0; 4] };
        assert_eq!(full.len_mismatch(), None);
    }

    #[test]
    fn test_pixel_index_does_not_wrap_past_u32() {
        let size = 70_000u32;
        let idx = pixel_index(size - 1, size - 1, size);
        assert_eq!(idx, 70_000usize * 70_000 - 1);
    }

    #[test]
    fn test_value_range() {
        let field = NoiseField { size: 2, values: vec![0.5, -0.25, 0.0, 0.75] };
        assert_eq!(field.value_range(), (-0.25, 0.75));
    }
}
