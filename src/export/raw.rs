//! RAW heightmap export for game engine imports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::noise::NoiseField;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f64, f64),
    #[error("Field holds {found} values, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// RAW export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian.
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian. Values are written unnormalized.
    R32Float,
}

impl RawFormat {
    /// Bytes written per sample.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            RawFormat::R16LittleEndian | RawFormat::R16BigEndian => 2,
            RawFormat::R32Float => 4,
        }
    }
}

/// Exports a noise field as headerless row-major RAW samples.
///
/// # Arguments
/// * `field` - The noise field to export
/// * `path` - Output file path
/// * `format` - RAW format (R16 or R32)
/// * `min_value` - Value mapped to 0 (R16 only)
/// * `max_value` - Value mapped to 65535 (R16 only)
///
/// # Returns
/// `Ok(())` on success, or an error if export fails
pub fn export_noise_raw(
    field: &NoiseField,
    path: &Path,
    format: RawFormat,
    min_value: f64,
    max_value: f64,
) -> Result<(), RawExportError> {
    if format != RawFormat::R32Float && min_value >= max_value {
        return Err(RawExportError::InvalidValueRange(min_value, max_value));
    }
    if let Some((expected, found)) = field.len_mismatch() {
        return Err(RawExportError::LengthMismatch { expected, found });
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let range = max_value - min_value;
    let to_u16 = |v: f64| (((v - min_value) / range).clamp(0.0, 1.0) * 65535.0) as u16;

    match format {
        // Normalize to [0, 65535]
        RawFormat::R16LittleEndian => {
            for &v in &field.values {
                writer.write_all(&to_u16(v).to_le_bytes())?;
            }
        }
        RawFormat::R16BigEndian => {
            for &v in &field.values {
                writer.write_all(&to_u16(v).to_be_bytes())?;
            }
        }
        // Raw values, no normalization
        RawFormat::R32Float => {
            for &v in &field.values {
                writer.write_all(&(v as f32).to_le_bytes())?;
            }
        }
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), ?format, "wrote raw noise");
    Ok(())
}
