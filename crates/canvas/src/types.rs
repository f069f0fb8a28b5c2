//! Input samples, device taxonomy, colors, and dirty rectangles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physical tablet device kind, as reported by the input stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceKind {
    /// Ordinary pressure/tilt stylus
    #[default]
    Stylus = 0,
    /// Airbrush with a tangential-pressure finger wheel
    Airbrush = 1,
    /// Four-axis stylus reporting barrel rotation
    RotationStylus = 2,
    /// Tablet puck (mouse-like)
    Puck = 3,
    /// Four-dimensional mouse
    FourDMouse = 4,
    /// Anything the input stack could not identify
    Unknown = 5,
}

/// Which end of the stylus is touching the tablet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerKind {
    #[default]
    Pen = 0,
    Eraser = 1,
}

/// One raw input observation from the tablet or pointer.
///
/// Immutable once recorded. Quantities the device does not report are left
/// at their `Default` values (zero), matching what input stacks deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in buffer coordinates
    pub pos: Vec2,
    /// Normalized contact pressure in [0, 1]
    pub pressure: f32,
    /// Tangential (wheel) pressure in [-1, 1]; airbrush devices only
    pub tangential_pressure: f32,
    /// Barrel rotation in degrees, clockwise from vertical
    pub rotation: f32,
    /// Tilt around the y axis, degrees in [-60, 60]
    pub x_tilt: f32,
    /// Tilt around the x axis, degrees in [-60, 60]
    pub y_tilt: f32,
    /// Reporting device
    pub device: DeviceKind,
    /// Pen or eraser end
    pub pointer: PointerKind,
    /// Bitmask of barrel/stylus buttons still held after this event;
    /// zero for a plain tip-up release
    pub buttons: u8,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            pressure: 0.0,
            tangential_pressure: 0.0,
            rotation: 0.0,
            x_tilt: 0.0,
            y_tilt: 0.0,
            device: DeviceKind::Stylus,
            pointer: PointerKind::Pen,
            buttons: 0,
        }
    }
}

impl Sample {
    /// Stylus sample with position and pressure, everything else default
    pub fn stylus(x: f32, y: f32, pressure: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            pressure,
            ..Default::default()
        }
    }
}

/// HSVA color in the 8-bit ranges the valuator math operates on:
/// hue 0..360, saturation/value/alpha 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsva {
    pub h: u16,
    pub s: u8,
    pub v: u8,
    pub a: u8,
}

impl Hsva {
    /// Opaque white
    pub const WHITE: Self = Self { h: 0, s: 0, v: 255, a: 255 };

    pub fn new(h: u16, s: u8, v: u8, a: u8) -> Self {
        Self { h: h % 360, s, v, a }
    }

    /// Convert from an RGBA byte color
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = (max - min) as f32;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g as f32 - b as f32) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b as f32 - r as f32) / delta + 2.0)
        } else {
            60.0 * ((r as f32 - g as f32) / delta + 4.0)
        };
        let s = if max == 0 {
            0.0
        } else {
            delta / max as f32 * 255.0
        };

        Self {
            h: (h.round() as u16) % 360,
            s: s.round() as u8,
            v: max,
            a,
        }
    }

    /// Convert to an RGBA byte color
    pub fn to_rgba(self) -> [u8; 4] {
        let v = self.v as f32;
        let s = self.s as f32 / 255.0;
        let sector = self.h as f32 / 60.0;
        let i = sector.floor();
        let f = sector - i;

        let p = (v * (1.0 - s)).round() as u8;
        let q = (v * (1.0 - s * f)).round() as u8;
        let t = (v * (1.0 - s * (1.0 - f))).round() as u8;
        let v = self.v;

        let (r, g, b) = match i as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        [r, g, b, self.a]
    }
}

/// Axis-aligned region of the buffer that must be redisplayed.
///
/// Coordinates may extend past the buffer edges; consumers clamp when
/// blitting. An empty rect means no pixels were touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    /// The empty rect (no redisplay needed)
    pub const EMPTY: Self = Self { x: 0, y: 0, width: 0, height: 0 };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Normalized integer bounding box of two points.
    ///
    /// Always at least 1x1: an axis-aligned span still covers the pixel
    /// row/column it lies on.
    pub fn spanning(a: Vec2, b: Vec2) -> Self {
        let min_x = a.x.min(b.x).floor() as i32;
        let min_y = a.y.min(b.y).floor() as i32;
        let max_x = a.x.max(b.x).ceil() as i32;
        let max_y = a.y.max(b.y).ceil() as i32;
        Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x).max(1),
            height: (max_y - min_y).max(1),
        }
    }

    /// Grow the rect by `margin` pixels on every side
    pub fn inflated(self, margin: i32) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    /// Smallest rect covering both; empty rects are identity
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Clamp to buffer dimensions; None if nothing remains
    pub fn clamped(self, buf_width: u32, buf_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width).min(buf_width as i32);
        let y1 = (self.y + self.height).min(buf_height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    /// Whether a pixel coordinate falls inside the rect
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsva_rgba_round_trip_primaries() {
        for rgba in [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 128],
            [255, 255, 255, 255],
            [0, 0, 0, 255],
        ] {
            let hsva = Hsva::from_rgba(rgba);
            assert_eq!(hsva.to_rgba(), rgba);
        }
    }

    #[test]
    fn test_hsva_white_is_unsaturated() {
        assert_eq!(Hsva::WHITE.s, 0);
        assert_eq!(Hsva::WHITE.to_rgba(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_dirty_rect_spanning_normalizes() {
        let rect = DirtyRect::spanning(Vec2::new(20.0, 10.0), Vec2::new(10.0, 30.0));
        assert_eq!(rect, DirtyRect::new(10, 10, 10, 20));
    }

    #[test]
    fn test_dirty_rect_inflate_and_union() {
        let a = DirtyRect::new(10, 10, 10, 10).inflated(2);
        assert_eq!(a, DirtyRect::new(8, 8, 14, 14));

        let b = DirtyRect::new(30, 0, 5, 5);
        let u = a.union(b);
        assert_eq!(u, DirtyRect::new(8, 0, 27, 22));

        assert_eq!(DirtyRect::EMPTY.union(b), b);
    }

    #[test]
    fn test_dirty_rect_clamped() {
        let rect = DirtyRect::new(-5, -5, 20, 20);
        assert_eq!(rect.clamped(10, 10), Some((0, 0, 10, 10)));
        assert_eq!(DirtyRect::new(50, 50, 5, 5).clamped(10, 10), None);
    }

    #[test]
    fn test_sample_default_is_stylus_pen() {
        let sample = Sample::default();
        assert_eq!(sample.device, DeviceKind::Stylus);
        assert_eq!(sample.pointer, PointerKind::Pen);
        assert_eq!(sample.pressure, 0.0);
    }
}
