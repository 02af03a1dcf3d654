//! Export module for writing noise fields to image and RAW files.
//!
//! Supports 16-bit PNG heightmaps, an 8-bit preview shaded the way the
//! interactive viewer displays the field, RAW samples for game engine
//! imports, and a debug overlay with the grid and gradient vectors.

mod png;
mod raw;
mod overlay;

pub use png::{
    export_noise_png,
    export_preview_png,
    preview_shade,
    PngExportOptions,
    PngExportError,
};
pub use raw::{export_noise_raw, RawFormat, RawExportError};
pub use overlay::{
    export_overlay_png, render_overlay,
    OverlayOptions, OverlayError,
};
