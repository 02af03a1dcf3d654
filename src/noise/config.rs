//! Configuration for gradient noise generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a noise configuration cannot produce a field.
///
/// Validation happens before any buffer is allocated, so a failed
/// configuration never yields a partial result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Output size must be positive")]
    ZeroSize,
    #[error("Grid cell size must be positive")]
    ZeroGrid,
    #[error("Output size {size} is not a multiple of grid cell size {grid}")]
    NotMultiple { size: u32, grid: u32 },
}

/// Parameters for a single noise generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Side length of the square output matrix, in pixels.
    pub size: u32,
    /// Side length of one grid cell, in pixels. Must divide `size`.
    pub grid: u32,
    /// Seed for the gradient random source.
    pub seed: u64,
    /// Whether to tag each pixel with its nearest cell corner.
    pub classify_corners: bool,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            size: 800,
            grid: 100,
            seed: 42,
            classify_corners: false,
        }
    }
}

impl NoiseConfig {
    /// Creates a configuration for the given output and cell sizes.
    pub fn new(size: u32, grid: u32) -> Self {
        Self {
            size,
            grid,
            ..Default::default()
        }
    }

    /// Creates the default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables corner classification.
    pub fn classify_corners(mut self, enabled: bool) -> Self {
        self.classify_corners = enabled;
        self
    }

    /// Checks that `size` is a positive multiple of a positive `grid`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.size, self.grid)
    }

    /// Number of cells along each axis.
    ///
    /// Only meaningful for a configuration that passes [`validate`](Self::validate).
    pub fn cells(&self) -> u32 {
        self.size / self.grid.max(1)
    }

    /// Number of gradient corners along each axis (`cells + 1`).
    pub fn corners(&self) -> u32 {
        self.cells() + 1
    }
}

/// Validates a `(size, grid)` pair.
pub fn validate_dimensions(size: u32, grid: u32) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroSize);
    }
    if grid == 0 {
        return Err(ConfigError::ZeroGrid);
    }
    if size % grid != 0 {
        return Err(ConfigError::NotMultiple { size, grid });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NoiseConfig::default();
        assert_eq!(config.size, 800);
        assert_eq!(config.grid, 100);
        assert_eq!(config.corners(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_dimensions() {
        assert_eq!(validate_dimensions(0, 4), Err(ConfigError::ZeroSize));
        assert_eq!(validate_dimensions(8, 0), Err(ConfigError::ZeroGrid));
        assert_eq!(
            validate_dimensions(10, 3),
            Err(ConfigError::NotMultiple { size: 10, grid: 3 })
        );
    }

    #[test]
    fn test_zero_size_checked_before_grid() {
        assert_eq!(validate_dimensions(0, 0), Err(ConfigError::ZeroSize));
    }

    #[test]
    fn test_grid_equal_to_size_is_valid() {
        let config = NoiseConfig::new(16, 16);
        assert!(config.validate().is_ok());
        assert_eq!(config.cells(), 1);
        assert_eq!(config.corners(), 2);
    }

    #[test]
    fn test_builder_setters() {
        let config = NoiseConfig::new(64, 8).seed(7).classify_corners(true);
        assert_eq!(config.seed, 7);
        assert!(config.classify_corners);
        assert_eq!(config.size, 64);
    }
}
