//! Per-device stroke compositing strategies
//!
//! [`render_segment`] dispatches on the reporting device kind and composites
//! one stroke segment (previous sample -> current sample) onto the raster
//! buffer: an anti-aliased round-cap line for styli, a soft radial dab for
//! airbrushes, a rotated quad ribbon for four-axis styli, and nothing at all
//! for devices without a strategy. Every path reports the dirty rectangle
//! the host must redisplay.

use glam::Vec2;
use tracing::debug;

use crate::constants::{AIRBRUSH_RADIUS_FACTOR, DIRTY_MARGIN, MAX_PEN_RADIUS};
use crate::error::Advisory;
use crate::raster::RasterBuffer;
use crate::types::{DeviceKind, DirtyRect, Sample};
use crate::valuator::BrushState;

/// Result of compositing one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOutcome {
    /// Region of the buffer that must be redisplayed
    pub dirty: DirtyRect,
    /// At most one non-fatal condition per segment
    pub advisory: Option<Advisory>,
}

impl SegmentOutcome {
    fn clean(dirty: DirtyRect) -> Self {
        Self {
            dirty,
            advisory: None,
        }
    }
}

/// Composite one stroke segment onto the buffer.
///
/// Mutates `buffer` in place; no other writer may touch it during the call.
/// The returned dirty rect is the minimal region covering every touched
/// pixel, inflated to cover anti-aliasing bleed.
pub fn render_segment(
    buffer: &mut RasterBuffer,
    prev: &Sample,
    prev_brush: &BrushState,
    cur: &Sample,
    cur_brush: &BrushState,
    device: DeviceKind,
) -> SegmentOutcome {
    match device {
        DeviceKind::Stylus => SegmentOutcome::clean(stylus_segment(buffer, prev, cur, cur_brush)),
        DeviceKind::Airbrush => SegmentOutcome::clean(airbrush_dab(
            buffer,
            cur.pos,
            cur_brush.width * AIRBRUSH_RADIUS_FACTOR,
            cur_brush.color.to_rgba(),
        )),
        DeviceKind::RotationStylus => {
            SegmentOutcome::clean(ribbon_segment(buffer, prev, prev_brush, cur, cur_brush))
        }
        DeviceKind::Puck | DeviceKind::FourDMouse => {
            debug!("render_segment: {device:?} has no rendering strategy, skipping");
            SegmentOutcome {
                dirty: DirtyRect::EMPTY,
                advisory: Some(Advisory::UnsupportedDevice(device)),
            }
        }
        DeviceKind::Unknown => {
            debug!("render_segment: unknown device, falling back to stylus");
            SegmentOutcome {
                dirty: stylus_segment(buffer, prev, cur, cur_brush),
                advisory: Some(Advisory::UnknownDevice),
            }
        }
    }
}

/// Straight line from the previous to the current position, dirty rect
/// inflated by the worst-case pen radius
fn stylus_segment(
    buffer: &mut RasterBuffer,
    prev: &Sample,
    cur: &Sample,
    brush: &BrushState,
) -> DirtyRect {
    stroke_line(
        buffer,
        prev.pos,
        cur.pos,
        brush.color.to_rgba(),
        brush.width,
    );
    DirtyRect::spanning(prev.pos, cur.pos)
        .inflated(MAX_PEN_RADIUS.ceil() as i32 + DIRTY_MARGIN)
}

/// Anti-aliased line with round caps.
///
/// Coverage comes from the distance of each pixel center to the segment,
/// so caps and joins are round for free.
pub fn stroke_line(buffer: &mut RasterBuffer, a: Vec2, b: Vec2, color: [u8; 4], width: f32) {
    let half = (width.max(0.0)) / 2.0;
    let Some((x0, y0, w, h)) = DirtyRect::spanning(a, b)
        .inflated(half.ceil() as i32 + 1)
        .clamped(buffer.width, buffer.height)
    else {
        return;
    };

    for py in y0..y0 + h {
        for px in x0..x0 + w {
            let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            let d = distance_to_segment(p, a, b);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                buffer.blend_pixel(px, py, color, coverage);
            }
        }
    }
}

/// Distance from a point to a line segment (degenerates to point distance)
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Soft radial dab: 25% of nominal alpha at the center, transparent from
/// half the radius outward, no outline.
///
/// Returns the bounding square of side `2 * radius` centered on the point.
pub fn airbrush_dab(
    buffer: &mut RasterBuffer,
    center: Vec2,
    radius: f32,
    color: [u8; 4],
) -> DirtyRect {
    if radius <= 0.0 {
        return DirtyRect::EMPTY;
    }

    let extent = Vec2::splat(radius);
    let dirty = DirtyRect::spanning(center - extent, center + extent);

    if let Some((x0, y0, w, h)) = dirty.clamped(buffer.width, buffer.height) {
        for py in y0..y0 + h {
            for px in x0..x0 + w {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let t = p.distance(center) / radius;
                if t >= 0.5 {
                    continue;
                }
                // Linear fade from the 25% center stop to the transparent
                // stop at half radius
                let coverage = 0.25 * (1.0 - t / 0.5);
                buffer.blend_pixel(px, py, color, coverage);
            }
        }
    }

    dirty
}

/// Tapered ribbon for the four-axis stylus: a filled convex quad whose ends
/// are perpendicular to the barrel rotation at each sample
fn ribbon_segment(
    buffer: &mut RasterBuffer,
    prev: &Sample,
    prev_brush: &BrushState,
    cur: &Sample,
    cur_brush: &BrushState,
) -> DirtyRect {
    let prev_offset = rotation_offset(prev.rotation, prev_brush.width);
    let cur_offset = rotation_offset(cur.rotation, cur_brush.width);

    let corners = [
        prev.pos + prev_offset,
        prev.pos - prev_offset,
        cur.pos - cur_offset,
        cur.pos + cur_offset,
    ];
    fill_convex_quad(buffer, corners, cur_brush.color.to_rgba())
}

/// Perpendicular half-width offset for a barrel rotation measured clockwise
/// from vertical
fn rotation_offset(rotation_deg: f32, half_width: f32) -> Vec2 {
    let rad = (-rotation_deg).to_radians();
    Vec2::new(rad.sin() * half_width, rad.cos() * half_width)
}

/// Fill a convex quadrilateral with anti-aliased edges, no outline.
///
/// Works for either winding; coverage per pixel is the smallest inward
/// edge distance.
pub fn fill_convex_quad(buffer: &mut RasterBuffer, corners: [Vec2; 4], color: [u8; 4]) -> DirtyRect {
    let min = corners.iter().copied().reduce(Vec2::min).unwrap_or(Vec2::ZERO);
    let max = corners.iter().copied().reduce(Vec2::max).unwrap_or(Vec2::ZERO);
    let dirty = DirtyRect::spanning(min, max).inflated(DIRTY_MARGIN);

    // Shoelace sign makes the inward edge distance positive for either winding
    let mut area = 0.0;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        area += a.x * b.y - b.x * a.y;
    }
    let orientation = if area >= 0.0 { 1.0 } else { -1.0 };

    let Some((x0, y0, w, h)) = dirty.clamped(buffer.width, buffer.height) else {
        return dirty;
    };

    for py in y0..y0 + h {
        for px in x0..x0 + w {
            let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);

            let mut inward = f32::INFINITY;
            for i in 0..4 {
                let a = corners[i];
                let b = corners[(i + 1) % 4];
                let edge = b - a;
                let len = edge.length();
                if len < 1e-6 {
                    continue;
                }
                let d = orientation * (edge.x * (p.y - a.y) - edge.y * (p.x - a.x)) / len;
                inward = inward.min(d);
            }

            let coverage = (inward + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                buffer.blend_pixel(px, py, color, coverage);
            }
        }
    }

    dirty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hsva;
    use crate::valuator::BrushStyle;

    fn brush(width: f32) -> BrushState {
        BrushState {
            color: Hsva::from_rgba([0, 0, 0, 255]),
            width,
            style: BrushStyle::Solid,
        }
    }

    fn luminance(buffer: &RasterBuffer, x: u32, y: u32) -> u8 {
        buffer.get_pixel(x, y).unwrap()[0]
    }

    #[test]
    fn test_stylus_segment_paints_line_and_inflates_dirty() {
        let mut buffer = RasterBuffer::new(64, 64);
        let prev = Sample::stylus(10.0, 32.0, 0.5);
        let cur = Sample::stylus(50.0, 32.0, 0.5);

        let outcome = render_segment(&mut buffer, &prev, &brush(3.0), &cur, &brush(3.0), DeviceKind::Stylus);

        assert!(outcome.advisory.is_none());
        // Pixels along the path turn dark
        assert!(luminance(&buffer, 30, 32) < 64);
        // Pixels well off the path stay white
        assert_eq!(luminance(&buffer, 30, 50), 255);
        // Dirty rect covers the span plus the worst-case pen radius
        assert!(outcome.dirty.contains(10 - 11, 32 - 11));
        assert!(outcome.dirty.contains(50 + 11, 32 + 11));
    }

    #[test]
    fn test_stroke_line_width_controls_extent() {
        let mut thin = RasterBuffer::new(32, 32);
        let mut thick = RasterBuffer::new(32, 32);
        let color = [0, 0, 0, 255];

        stroke_line(&mut thin, Vec2::new(4.0, 16.0), Vec2::new(28.0, 16.0), color, 1.0);
        stroke_line(&mut thick, Vec2::new(4.0, 16.0), Vec2::new(28.0, 16.0), color, 9.0);

        // 3 pixels above the path: inside a 9-wide stroke, outside a 1-wide one
        assert_eq!(luminance(&thin, 16, 13), 255);
        assert!(luminance(&thick, 16, 13) < 64);
    }

    #[test]
    fn test_stroke_line_zero_length_draws_round_cap() {
        let mut buffer = RasterBuffer::new(32, 32);
        stroke_line(&mut buffer, Vec2::new(16.0, 16.0), Vec2::new(16.0, 16.0), [0, 0, 0, 255], 6.0);
        assert!(luminance(&buffer, 16, 16) < 64);
        assert!(luminance(&buffer, 18, 16) < 64);
        assert_eq!(luminance(&buffer, 25, 16), 255);
    }

    #[test]
    fn test_airbrush_dab_fades_to_transparent_at_half_radius() {
        let mut buffer = RasterBuffer::new(64, 64);
        let cur = Sample {
            pos: Vec2::new(32.0, 32.0),
            device: DeviceKind::Airbrush,
            ..Default::default()
        };
        let b = brush(2.0); // radius = 2 * 10 = 20

        let outcome = render_segment(&mut buffer, &cur, &b, &cur, &b, DeviceKind::Airbrush);

        assert!(outcome.advisory.is_none());
        // Center is tinted but far from solid (25% of alpha)
        let center = luminance(&buffer, 32, 32);
        assert!(center < 255 && center > 128);
        // Beyond half the radius nothing is painted
        assert_eq!(luminance(&buffer, 32 + 12, 32), 255);
        // Dirty rect is the bounding square of side 2 * radius
        assert_eq!(outcome.dirty, DirtyRect::new(12, 12, 40, 40));
    }

    #[test]
    fn test_airbrush_dab_zero_radius_is_noop() {
        let mut buffer = RasterBuffer::new(16, 16);
        let dirty = airbrush_dab(&mut buffer, Vec2::new(8.0, 8.0), 0.0, [0, 0, 0, 255]);
        assert!(dirty.is_empty());
        assert_eq!(luminance(&buffer, 8, 8), 255);
    }

    #[test]
    fn test_ribbon_fills_rotated_quad() {
        let mut buffer = RasterBuffer::new(64, 64);
        // Rotation 0: offsets point straight down the y axis
        let prev = Sample {
            pos: Vec2::new(20.0, 32.0),
            rotation: 0.0,
            ..Default::default()
        };
        let cur = Sample {
            pos: Vec2::new(44.0, 32.0),
            rotation: 0.0,
            ..Default::default()
        };

        let outcome = render_segment(&mut buffer, &prev, &brush(4.0), &cur, &brush(4.0), DeviceKind::RotationStylus);

        assert!(outcome.advisory.is_none());
        // Interior is solid color
        assert!(luminance(&buffer, 32, 32) < 8);
        assert!(luminance(&buffer, 32, 34) < 8);
        // Outside the 4-pixel half-width stays white
        assert_eq!(luminance(&buffer, 32, 40), 255);
        // Dirty rect covers the quad corners
        assert!(outcome.dirty.contains(20, 28));
        assert!(outcome.dirty.contains(44, 36));
    }

    #[test]
    fn test_ribbon_tapers_with_differing_widths() {
        let mut buffer = RasterBuffer::new(64, 64);
        let prev = Sample {
            pos: Vec2::new(16.0, 32.0),
            ..Default::default()
        };
        let cur = Sample {
            pos: Vec2::new(48.0, 32.0),
            ..Default::default()
        };

        render_segment(&mut buffer, &prev, &brush(8.0), &cur, &brush(1.0), DeviceKind::RotationStylus);

        // Wide end covers 6 pixels off-axis, narrow end does not
        assert!(luminance(&buffer, 18, 38) < 64);
        assert_eq!(luminance(&buffer, 46, 38), 255);
    }

    #[test]
    fn test_puck_is_skipped_with_one_advisory() {
        let mut buffer = RasterBuffer::new(32, 32);
        let before = buffer.pixels().to_vec();
        let prev = Sample::stylus(4.0, 4.0, 1.0);
        let cur = Sample::stylus(28.0, 28.0, 1.0);

        let outcome = render_segment(&mut buffer, &prev, &brush(5.0), &cur, &brush(5.0), DeviceKind::Puck);

        assert_eq!(outcome.advisory, Some(Advisory::UnsupportedDevice(DeviceKind::Puck)));
        assert!(outcome.dirty.is_empty());
        assert_eq!(buffer.pixels(), &before[..]);

        let outcome = render_segment(&mut buffer, &prev, &brush(5.0), &cur, &brush(5.0), DeviceKind::FourDMouse);
        assert_eq!(outcome.advisory, Some(Advisory::UnsupportedDevice(DeviceKind::FourDMouse)));
    }

    #[test]
    fn test_unknown_device_falls_back_to_stylus() {
        let mut buffer = RasterBuffer::new(32, 32);
        let prev = Sample::stylus(4.0, 16.0, 1.0);
        let cur = Sample::stylus(28.0, 16.0, 1.0);

        let outcome = render_segment(&mut buffer, &prev, &brush(3.0), &cur, &brush(3.0), DeviceKind::Unknown);

        assert_eq!(outcome.advisory, Some(Advisory::UnknownDevice));
        assert!(!outcome.dirty.is_empty());
        assert!(luminance(&buffer, 16, 16) < 64);
    }
}
