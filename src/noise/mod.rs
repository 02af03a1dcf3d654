//! Grid-based 2D gradient noise.
//!
//! Generation runs as a fixed sequence of pure stages: a random gradient is
//! drawn for every grid corner, each pixel is located within its cell, the
//! four corner contributions are computed as dot products and finally blended
//! with a sine ease curve and clamped to `[-1, 1]`.

mod config;
mod gradient;
mod sample;
mod interpolate;
mod classify;
mod field;

pub use config::{NoiseConfig, ConfigError, validate_dimensions};
pub use gradient::GradientField;
pub use sample::{
    Corners, SampleCell, build_samples, cell_indices, fractional_position,
    distance_vectors, gradient_lookup, dot_products,
};
pub use interpolate::{fade, BlendWeights, bilinear_blend, interpolate};
pub use classify::{Corner, classify, classify_offset};
pub use field::{
    NoiseField, GeneratedNoise, NoiseError,
    generate, generate_with_options, generate_with_config, generate_from_gradients,
    sample_value,
};
pub(crate) use field::pixel_index;
