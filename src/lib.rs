//! Grid-based 2D gradient noise generator.
//!
//! This crate produces square fields of Perlin-style gradient noise in
//! `[-1, 1]` from an explicit output size, grid cell size and random source,
//! and exports them as heightmaps or annotated debug images.

pub mod noise;
pub mod export;

pub use noise::{
    NoiseConfig, NoiseField, GeneratedNoise, GradientField, NoiseError, ConfigError, Corner,
    generate, generate_with_config,
};
