//! Persistent RGBA canvas buffer
//!
//! The buffer is the only persistent state of the core: strokes composite
//! into it, clear/open replace its contents wholesale, and it only ever
//! grows. Pixels are 8-bit RGBA to match the valuator color model and the
//! image container used for load/save.

use image::RgbaImage;

use crate::constants::PAPER_WHITE;

/// A persistent 2D raster of RGBA8 pixels, row-major
#[derive(Debug)]
pub struct RasterBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl RasterBuffer {
    /// Create a buffer filled with paper white
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![PAPER_WHITE; pixel_count],
        }
    }

    /// Fill the whole buffer with a solid color
    pub fn fill(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    /// Get a pixel; None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Set a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color;
    }

    /// Source-over blend of `color` onto a pixel, scaled by `coverage`.
    ///
    /// `coverage` is the anti-aliasing fraction in [0, 1]; the effective
    /// source alpha is `color[3] * coverage`.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let src_alpha = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }
        let inv = 1.0 - src_alpha;

        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];
        self.pixels[index] = [
            (color[0] as f32 * src_alpha + dst[0] as f32 * inv).round() as u8,
            (color[1] as f32 * src_alpha + dst[1] as f32 * inv).round() as u8,
            (color[2] as f32 * src_alpha + dst[2] as f32 * inv).round() as u8,
            (src_alpha * 255.0 + dst[3] as f32 * inv).round() as u8,
        ];
    }

    /// Replace the buffer with a larger one, keeping the old content in the
    /// top-left and filling the new area with paper white.
    ///
    /// Shrinking is not supported; dimensions smaller than the current ones
    /// are ignored per axis.
    pub fn grow_to(&mut self, new_width: u32, new_height: u32) {
        let new_width = new_width.max(self.width);
        let new_height = new_height.max(self.height);
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut grown = vec![PAPER_WHITE; (new_width as usize) * (new_height as usize)];
        for y in 0..self.height as usize {
            let src = y * self.width as usize;
            let dst = y * new_width as usize;
            grown[dst..dst + self.width as usize]
                .copy_from_slice(&self.pixels[src..src + self.width as usize]);
        }

        self.width = new_width;
        self.height = new_height;
        self.pixels = grown;
    }

    /// Raw pixel data for host blitting/upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Build a buffer from a decoded image
    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copy the buffer into an image for encoding
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (pixel, src) in img.pixels_mut().zip(&self.pixels) {
            pixel.0 = *src;
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_paper_white() {
        let buffer = RasterBuffer::new(10, 10);
        assert_eq!(buffer.pixel_count(), 100);
        assert_eq!(buffer.get_pixel(0, 0), Some(PAPER_WHITE));
        assert_eq!(buffer.get_pixel(9, 9), Some(PAPER_WHITE));
    }

    #[test]
    fn test_get_set_pixel_bounds() {
        let mut buffer = RasterBuffer::new(10, 10);
        let color = [12, 34, 56, 255];

        buffer.set_pixel(5, 5, color);
        assert_eq!(buffer.get_pixel(5, 5), Some(color));
        assert_eq!(buffer.get_pixel(10, 5), None);

        // Out-of-bounds write is a no-op, not a panic
        buffer.set_pixel(100, 100, color);
    }

    #[test]
    fn test_blend_pixel_half_coverage() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.blend_pixel(1, 1, [0, 0, 0, 255], 0.5);

        let result = buffer.get_pixel(1, 1).unwrap();
        // Half-covered black over white is mid gray
        assert!((result[0] as i32 - 128).abs() <= 1);
        assert_eq!(result[3], 255);
    }

    #[test]
    fn test_blend_pixel_zero_coverage_is_noop() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.blend_pixel(1, 1, [0, 0, 0, 255], 0.0);
        assert_eq!(buffer.get_pixel(1, 1), Some(PAPER_WHITE));
    }

    #[test]
    fn test_grow_preserves_content() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.set_pixel(3, 3, [1, 2, 3, 255]);

        buffer.grow_to(8, 6);
        assert_eq!(buffer.width, 8);
        assert_eq!(buffer.height, 6);
        assert_eq!(buffer.get_pixel(3, 3), Some([1, 2, 3, 255]));
        assert_eq!(buffer.get_pixel(7, 5), Some(PAPER_WHITE));
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut buffer = RasterBuffer::new(8, 8);
        buffer.grow_to(4, 16);
        assert_eq!((buffer.width, buffer.height), (8, 16));
    }

    #[test]
    fn test_image_round_trip() {
        let mut buffer = RasterBuffer::new(3, 2);
        buffer.set_pixel(2, 1, [9, 8, 7, 255]);

        let img = buffer.to_image();
        let back = RasterBuffer::from_image(&img);
        assert_eq!((back.width, back.height), (3, 2));
        assert_eq!(back.pixels(), buffer.pixels());
    }

    #[test]
    fn test_buffer_is_debug_formattable() {
        // Result combinators over buffers (unwrap_err and friends) need this
        let rendered = format!("{:?}", RasterBuffer::new(2, 1));
        assert!(rendered.contains("RasterBuffer"));
        assert!(rendered.contains("width: 2"));
    }

    #[test]
    fn test_as_bytes_length() {
        let buffer = RasterBuffer::new(2, 2);
        assert_eq!(buffer.as_bytes().len(), 16);
    }
}
