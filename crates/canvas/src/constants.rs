/// Widest pen any valuator mapping can produce: full pressure in the
/// Pressure width mode (10 * 1.0 + 1). Dirty rectangles for line strokes
/// are inflated by this radius to cover anti-aliasing bleed.
pub const MAX_PEN_RADIUS: f32 = 11.0;

/// Extra dirty-rect margin on top of the pen radius, for filter bleed.
pub const DIRTY_MARGIN: i32 = 1;

/// Airbrush dab radius as a multiple of the current pen width.
pub const AIRBRUSH_RADIUS_FACTOR: f32 = 10.0;

/// Nominal tilt range reported by tablets, in degrees.
pub const TILT_RANGE_DEG: f32 = 60.0;

/// Opaque white, the paper color used for clear, growth fill, and eraser.
pub const PAPER_WHITE: [u8; 4] = [255, 255, 255, 255];
