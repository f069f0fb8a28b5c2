//! Shared configuration for Ebru
//!
//! This crate provides the single source of truth for canvas dimensions,
//! buffer growth behavior, and default pen settings shared between the
//! painting core and whichever host shell embeds it.

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 500;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 500;

/// Extra pixels allocated beyond the viewport when the buffer grows,
/// so that small window resizes do not trigger a reallocation each time
pub const GROW_MARGIN: u32 = 128;

/// Default pen width in pixels for the plain-mouse path
pub const DEFAULT_PEN_WIDTH: u32 = 1;

/// Default pen color as RGBA (blue, matching the original application)
pub const DEFAULT_PEN_COLOR: [u8; 4] = [0, 0, 255, 255];

/// Canvas configuration for the painting core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Initial buffer width in pixels
    pub width: u32,
    /// Initial buffer height in pixels
    pub height: u32,
    /// Pen width for the plain-mouse path
    pub pen_width: u32,
    /// Pen color as RGBA bytes
    pub pen_color: [u8; 4],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            pen_width: DEFAULT_PEN_WIDTH,
            pen_color: DEFAULT_PEN_COLOR,
        }
    }
}

impl CanvasConfig {
    /// Create a new canvas config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Buffer dimensions required to cover the given viewport,
    /// including the growth margin
    pub fn grown_size(current: (u32, u32), viewport: (u32, u32)) -> (u32, u32) {
        (
            (viewport.0 + GROW_MARGIN).max(current.0),
            (viewport.1 + GROW_MARGIN).max(current.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(config.height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(config.pen_width, 1);
    }

    #[test]
    fn test_new_config() {
        let config = CanvasConfig::new(800, 600);
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.pen_color, DEFAULT_PEN_COLOR);
    }

    #[test]
    fn test_grown_size() {
        // Viewport larger than buffer: grow to viewport + margin
        assert_eq!(
            CanvasConfig::grown_size((500, 500), (600, 400)),
            (600 + GROW_MARGIN, 400 + GROW_MARGIN)
        );
        // Buffer already large enough in one dimension: keep it
        assert_eq!(
            CanvasConfig::grown_size((1000, 500), (600, 600)),
            (1000, 600 + GROW_MARGIN)
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let config = CanvasConfig::new(640, 480);
        let json = serde_json::to_string(&config).unwrap();
        let back: CanvasConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, 640);
        assert_eq!(back.height, 480);
    }
}
