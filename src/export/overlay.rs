//! Debug overlay export: shaded noise with grid lines and gradient arrows.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use glam::DVec2;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};
use thiserror::Error;

use crate::noise::{pixel_index, validate_dimensions, ConfigError, Corner, GeneratedNoise};
use super::png::preview_shade;

const GRID_COLOR: [u8; 3] = [255, 255, 255];
const GRADIENT_COLOR: [u8; 3] = [0, 255, 0];

/// Errors that can occur during overlay export.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("No corner data available - generate with corner classification enabled")]
    NoCornerData,
    #[error("{what} holds {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid grid: {0}")]
    Grid(#[from] ConfigError),
    #[error("Overlay of size {size} with margin {margin} exceeds the u32 pixel range")]
    TooLarge { size: u32, margin: u32 },
}

/// Options for overlay rendering.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Black border around the field, in pixels.
    pub margin: u32,
    /// Draw the cell grid.
    pub draw_grid: bool,
    /// Draw each corner's gradient as a segment of length `grid`.
    pub draw_gradients: bool,
    /// Tint each pixel by its nearest corner.
    pub tint_corners: bool,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            margin: 0,
            draw_grid: true,
            draw_gradients: true,
            tint_corners: false,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Returns the tint color for a corner quadrant.
fn corner_color(corner: Corner) -> [u8; 3] {
    match corner {
        Corner::A => [230, 80, 80],   // Red
        Corner::B => [80, 200, 80],   // Green
        Corner::C => [80, 120, 230],  // Blue
        Corner::D => [230, 200, 60],  // Yellow
    }
}

/// Renders the overlay image in memory.
///
/// The image is `size + 2 * margin` pixels square. Lines that fall outside
/// the image are clipped.
///
/// # Arguments
/// * `noise` - Generation output with field, grid and gradients
/// * `options` - Margin, layers to draw and PNG settings
///
/// # Returns
/// The RGB image, or an error if `noise` is inconsistent with its own size
pub fn render_overlay(
    noise: &GeneratedNoise,
    options: &OverlayOptions,
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>, OverlayError> {
    let size = noise.size();
    let margin = options.margin;
    let dim = margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(size))
        .ok_or(OverlayError::TooLarge { size, margin })?;

    validate_dimensions(size, noise.grid)?;
    let expected = noise.field.expected_len();
    if noise.field.values.len() != expected {
        return Err(OverlayError::LengthMismatch {
            what: "field",
            expected,
            found: noise.field.values.len(),
        });
    }

    let per_axis = size / noise.grid + 1;
    let (cx, cy) = (noise.gradients.corners_x(), noise.gradients.corners_y());
    if cx != per_axis || cy != per_axis {
        return Err(OverlayError::LengthMismatch {
            what: "gradient corners",
            expected: per_axis as usize * per_axis as usize,
            found: cx as usize * cy as usize,
        });
    }

    let corners = if options.tint_corners {
        let tags = noise.corners.as_ref().ok_or(OverlayError::NoCornerData)?;
        if tags.len() != expected {
            return Err(OverlayError::LengthMismatch {
                what: "corner tags",
                expected,
                found: tags.len(),
            });
        }
        Some(tags)
    } else {
        None
    };

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(dim, dim);

    // Shaded noise, optionally blended half and half with the corner tint.
    for y in 0..size {
        for x in 0..size {
            let shade = preview_shade(noise.field.get(x, y));
            let color = match corners {
                Some(tags) => {
                    let tint = corner_color(tags[pixel_index(x, y, size)]);
                    tint.map(|c| ((c as u16 + shade as u16) / 2) as u8)
                }
                None => [shade; 3],
            };
            img.put_pixel(x + margin, y + margin, Rgb(color));
        }
    }

    let grid = noise.grid;
    let cells = size / grid;
    let origin = margin as f64;
    let far = (margin + size) as f64;

    if options.draw_grid {
        for k in 0..=cells {
            let offset = (margin + k * grid) as f64;
            draw_line(&mut img, DVec2::new(offset, origin), DVec2::new(offset, far), GRID_COLOR);
            draw_line(&mut img, DVec2::new(origin, offset), DVec2::new(far, offset), GRID_COLOR);
        }
    }

    if options.draw_gradients {
        for (i, j, gradient) in noise.gradients.iter() {
            let start = DVec2::new((margin + i * grid) as f64, (margin + j * grid) as f64);
            let end = start + gradient * grid as f64;
            draw_line(&mut img, start, end, GRADIENT_COLOR);
        }
    }

    Ok(img)
}

/// Rasterizes a segment by stepping one pixel along its longer axis.
fn draw_line(img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, start: DVec2, end: DVec2, color: [u8; 3]) {
    let delta = end - start;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;

    for s in 0..=steps {
        let p = start + delta * (s as f64 / steps as f64);
        let (x, y) = (p.x.round(), p.y.round());
        if x >= 0.0 && y >= 0.0 && x < img.width() as f64 && y < img.height() as f64 {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
}

/// Renders the overlay and writes it as an RGB PNG.
///
/// # Arguments
/// * `noise` - Generation output to visualize
/// * `path` - Output file path
/// * `options` - Overlay rendering options
///
/// # Returns
/// `Ok(())` on success, or an error if rendering or writing fails
pub fn export_overlay_png(
    noise: &GeneratedNoise,
    path: &Path,
    options: &OverlayOptions,
) -> Result<(), OverlayError> {
    let img = render_overlay(noise, options)?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    tracing::debug!(path = %path.display(), "wrote overlay png");
    Ok(())
}
