//! Proximity-driven cursor glyph selection
//!
//! Purely cosmetic: when a tool comes into or leaves tablet proximity the
//! host is asked to swap the pointer image. The core only picks the glyph;
//! the host owns the actual cursor bitmaps.

use serde::{Deserialize, Serialize};

use crate::types::{DeviceKind, PointerKind};

/// Direction of a tablet proximity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Enter,
    Leave,
}

/// Which cursor image the host should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CursorGlyph {
    /// Toolkit default arrow
    #[default]
    Arrow,
    Pencil,
    Airbrush,
    /// Rotation-stylus marker; hosts may additionally rotate the bitmap by
    /// the current barrel rotation
    FeltMarker,
    Eraser,
}

impl CursorGlyph {
    /// Glyph for a tool entering proximity
    pub fn for_device(device: DeviceKind, pointer: PointerKind) -> Self {
        if pointer == PointerKind::Eraser {
            return CursorGlyph::Eraser;
        }
        match device {
            DeviceKind::Stylus => CursorGlyph::Pencil,
            DeviceKind::Airbrush => CursorGlyph::Airbrush,
            DeviceKind::RotationStylus => CursorGlyph::FeltMarker,
            _ => CursorGlyph::Arrow,
        }
    }

    /// Hotspot in glyph-image pixels
    pub fn hotspot(self) -> (i32, i32) {
        match self {
            CursorGlyph::Arrow => (0, 0),
            CursorGlyph::Pencil => (0, 0),
            CursorGlyph::Airbrush => (3, 4),
            CursorGlyph::FeltMarker => (16, 16),
            CursorGlyph::Eraser => (3, 28),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_pointer_wins_over_device() {
        assert_eq!(
            CursorGlyph::for_device(DeviceKind::Airbrush, PointerKind::Eraser),
            CursorGlyph::Eraser
        );
    }

    #[test]
    fn test_device_glyphs() {
        assert_eq!(
            CursorGlyph::for_device(DeviceKind::Stylus, PointerKind::Pen),
            CursorGlyph::Pencil
        );
        assert_eq!(
            CursorGlyph::for_device(DeviceKind::RotationStylus, PointerKind::Pen),
            CursorGlyph::FeltMarker
        );
        assert_eq!(
            CursorGlyph::for_device(DeviceKind::Puck, PointerKind::Pen),
            CursorGlyph::Arrow
        );
    }

    #[test]
    fn test_hotspots() {
        assert_eq!(CursorGlyph::Eraser.hotspot(), (3, 28));
        assert_eq!(CursorGlyph::Pencil.hotspot(), (0, 0));
    }
}
