//! Valuator mapping from physical input quantities to brush parameters
//!
//! Each of the three brush attributes (alpha, saturation, stroke width) is
//! driven by an independently configurable valuator. The derivation functions
//! are pure so each mapping is unit-testable on its own; [`derive_brush`]
//! combines them into the next [`BrushState`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::TILT_RANGE_DEG;
use crate::types::{DeviceKind, Hsva, PointerKind, Sample};

/// Which physical quantity drives a brush attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuatorMode {
    Pressure,
    TangentialPressure,
    Tilt,
    VerticalTilt,
    HorizontalTilt,
    /// Attribute stays at its fixed default
    Fixed,
}

/// One valuator per brush attribute.
///
/// Set by the host; changes take effect on the next sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuatorConfig {
    pub alpha: ValuatorMode,
    pub saturation: ValuatorMode,
    pub width: ValuatorMode,
}

impl Default for ValuatorConfig {
    /// The original application's startup selection
    fn default() -> Self {
        Self {
            alpha: ValuatorMode::TangentialPressure,
            saturation: ValuatorMode::Fixed,
            width: ValuatorMode::Pressure,
        }
    }
}

/// Fill style of the current brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushStyle {
    #[default]
    Solid,
    Eraser,
}

/// Derived brush parameters for one sample.
///
/// A value recomputed on every sample, never mutated in place; the hue and
/// value channels of `color` carry over from the previous state, everything
/// else is rewritten per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    pub color: Hsva,
    /// Pen width in pixels; the ribbon strategy uses the value directly as
    /// its perpendicular half-width offset
    pub width: f32,
    pub style: BrushStyle,
}

impl BrushState {
    /// Brush with the given base color, unit width, solid style
    pub fn with_color(color: Hsva) -> Self {
        Self {
            color,
            width: 1.0,
            style: BrushStyle::Solid,
        }
    }
}

impl Default for BrushState {
    fn default() -> Self {
        Self::with_color(Hsva::from_rgba(ebru_config::DEFAULT_PEN_COLOR))
    }
}

/// Map a tilt angle in [-60, 60] degrees onto the 0..=255 projection scale.
///
/// Truncates toward zero, so zero tilt lands exactly on the 127 midpoint.
#[inline]
pub fn tilt_projection(angle_deg: f32) -> i32 {
    let projected = ((angle_deg + TILT_RANGE_DEG) / (2.0 * TILT_RANGE_DEG) * 255.0) as i32;
    projected.clamp(0, 255)
}

/// Width produced by a pressure reading: 1 pixel at rest, 11 at full press
#[inline]
pub fn pressure_to_width(pressure: f32) -> f32 {
    pressure.clamp(0.0, 1.0) * 10.0 + 1.0
}

/// How far the pen leans off vertical, on the projection scale
#[inline]
fn tilt_spread(v_value: i32, h_value: i32) -> i32 {
    (v_value - 127).abs().max((h_value - 127).abs())
}

fn derive_alpha(mode: ValuatorMode, sample: &Sample, v_value: i32, h_value: i32) -> u8 {
    match mode {
        ValuatorMode::Pressure => (sample.pressure.clamp(0.0, 1.0) * 255.0).round() as u8,
        ValuatorMode::TangentialPressure => {
            if sample.device == DeviceKind::Airbrush {
                let alpha = ((sample.tangential_pressure + 1.0) / 2.0).max(0.01);
                (alpha * 255.0).round() as u8
            } else {
                255
            }
        }
        ValuatorMode::Tilt => tilt_spread(v_value, h_value) as u8,
        _ => 255,
    }
}

fn derive_saturation(
    mode: ValuatorMode,
    sample: &Sample,
    previous: u8,
    v_value: i32,
    h_value: i32,
) -> u8 {
    match mode {
        ValuatorMode::VerticalTilt => v_value as u8,
        ValuatorMode::HorizontalTilt => h_value as u8,
        ValuatorMode::Pressure => (sample.pressure.clamp(0.0, 1.0) * 255.0) as u8,
        _ => previous,
    }
}

fn derive_width(mode: ValuatorMode, sample: &Sample, v_value: i32, h_value: i32) -> f32 {
    match mode {
        ValuatorMode::Pressure => pressure_to_width(sample.pressure),
        // Integer division on purpose: matches the projection scale's
        // truncating arithmetic
        ValuatorMode::Tilt => (tilt_spread(v_value, h_value) / 12) as f32,
        _ => 1.0,
    }
}

/// Derive the brush for one sample from the previous state and the active
/// valuator configuration.
///
/// Pure: hue and value carry over from `prev`, alpha and saturation are
/// rewritten, width is recomputed. An eraser pointer overrides everything
/// with opaque white at pressure-driven width.
pub fn derive_brush(prev: &BrushState, sample: &Sample, config: &ValuatorConfig) -> BrushState {
    if sample.pointer == PointerKind::Eraser {
        return BrushState {
            color: Hsva::WHITE,
            width: pressure_to_width(sample.pressure),
            style: BrushStyle::Eraser,
        };
    }

    let v_value = tilt_projection(sample.y_tilt);
    let h_value = tilt_projection(sample.x_tilt);

    let color = Hsva {
        h: prev.color.h,
        s: derive_saturation(config.saturation, sample, prev.color.s, v_value, h_value),
        v: prev.color.v,
        a: derive_alpha(config.alpha, sample, v_value, h_value),
    };
    let width = derive_width(config.width, sample, v_value, h_value);

    debug!(
        "derive_brush: alpha={} sat={} width={:.1} (modes {:?})",
        color.a, color.s, width, config
    );

    BrushState {
        color,
        width,
        style: BrushStyle::Solid,
    }
}
