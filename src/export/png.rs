//! PNG export for noise fields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::noise::NoiseField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f64, f64),
    #[error("Field holds {found} values, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

fn check_len(field: &NoiseField) -> Result<(), PngExportError> {
    match field.len_mismatch() {
        Some((expected, found)) => Err(PngExportError::LengthMismatch { expected, found }),
        None => Ok(()),
    }
}

/// Options for 16-bit heightmap export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Value mapped to black.
    pub min_value: f64,
    /// Value mapped to white.
    pub max_value: f64,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_value: -1.0,
            max_value: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options stretched over the field's actual value range.
    pub fn auto_range(field: &NoiseField) -> Self {
        let (min, max) = field.value_range();
        Self {
            min_value: min,
            max_value: max,
            ..Default::default()
        }
    }
}

/// Display shade for a noise value: `128 + value * 250`, clamped to a byte.
///
/// Values beyond about ±0.51 saturate.
#[inline]
pub fn preview_shade(value: f64) -> u8 {
    (128.0 + value * 250.0).clamp(0.0, 255.0) as u8
}

/// Exports a noise field as a 16-bit grayscale PNG heightmap.
///
/// Values are normalized from `[min_value, max_value]` to the full `u16` range.
///
/// # Arguments
/// * `field` - The noise field to export
/// * `path` - Output file path
/// * `options` - Value range and PNG encoder settings
///
/// # Returns
/// `Ok(())` on success, or an error if the inputs are invalid or writing fails
pub fn export_noise_png(
    field: &NoiseField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_value;
    let max = options.max_value;

    if min >= max {
        return Err(PngExportError::InvalidValueRange(min, max));
    }
    check_len(field)?;

    let size = field.size;
    let range = max - min;

    // Create 16-bit grayscale image
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let normalized = ((field.get(x, y) - min) / range).clamp(0.0, 1.0);
            img.put_pixel(x, y, Luma([(normalized * 65535.0) as u16]));
        }
    }

    // Write with specified compression
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 buffer to bytes for encoding
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, size, size, image::ExtendedColorType::L16)?;

    tracing::debug!(path = %path.display(), size, "wrote 16-bit noise png");
    Ok(())
}

/// Exports a noise field as an 8-bit preview using [`preview_shade`].
pub fn export_preview_png(field: &NoiseField, path: &Path) -> Result<(), PngExportError> {
    check_len(field)?;

    let data: Vec<u8> = field.values.iter().map(|&v| preview_shade(v)).collect();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(&data, field.size, field.size, image::ExtendedColorType::L8)?;

    tracing::debug!(path = %path.display(), size = field.size, "wrote preview png");
    Ok(())
}
