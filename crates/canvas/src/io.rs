//! Load/save of the raster buffer and background pattern scaling
//!
//! The persisted form is a plain raster image in a standard container
//! (PNG, BMP, ... whatever the path's extension selects); no custom format.
//! Loading is all-or-nothing: a failed decode leaves the caller's buffer
//! untouched because the replacement buffer is only built on success.

use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::error::CanvasError;
use crate::raster::RasterBuffer;

/// Decode the image at `path` into a fresh buffer
pub fn load_buffer(path: &Path) -> Result<RasterBuffer, CanvasError> {
    let img = image::open(path).map_err(|source| CanvasError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    debug!(
        "load_buffer: {} -> {}x{}",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(RasterBuffer::from_image(&rgba))
}

/// Encode the buffer to `path`; the container is chosen by the extension
pub fn save_buffer(buffer: &RasterBuffer, path: &Path) -> Result<(), CanvasError> {
    buffer
        .to_image()
        .save(path)
        .map_err(|source| CanvasError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("save_buffer: wrote {}x{} to {}", buffer.width, buffer.height, path.display());
    Ok(())
}

/// Fill the buffer with a background pattern, scaled by the larger of the
/// two axis ratios (aspect-preserving, expanding) and cropped to the
/// buffer, anchored top-left. Nearest-neighbor sampling.
pub fn fill_background(buffer: &mut RasterBuffer, background: &RgbaImage) {
    let (img_w, img_h) = background.dimensions();
    if img_w == 0 || img_h == 0 {
        return;
    }
    let scale = (buffer.width as f32 / img_w as f32).max(buffer.height as f32 / img_h as f32);

    for y in 0..buffer.height {
        let sy = ((y as f32 / scale) as u32).min(img_h - 1);
        for x in 0..buffer.width {
            let sx = ((x as f32 / scale) as u32).min(img_w - 1);
            buffer.set_pixel(x, y, background.get_pixel(sx, sy).0);
        }
    }
}
