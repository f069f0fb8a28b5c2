//! Gesture state machine and host-facing canvas operations
//!
//! [`PaintCanvas`] owns the raster buffer, the valuator configuration, and
//! the transient press-to-release session state. A thin host adapter feeds
//! it input events and configuration changes; redisplay requests, cursor
//! swaps, and advisories flow back through the [`CanvasHost`] it is handed
//! with each event. Single-threaded by construction: every handler runs to
//! completion before the next event arrives.

use glam::Vec2;
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

use ebru_config::CanvasConfig;

use crate::constants::PAPER_WHITE;
use crate::cursor::{CursorGlyph, Proximity};
use crate::error::CanvasError;
use crate::host::CanvasHost;
use crate::io;
use crate::raster::RasterBuffer;
use crate::render::{render_segment, stroke_line};
use crate::types::{DeviceKind, DirtyRect, Hsva, PointerKind, Sample};
use crate::valuator::{derive_brush, BrushState, ValuatorConfig, ValuatorMode};

/// Tablet press-to-release session.
///
/// Only one session can be active; compositing happens exclusively in the
/// `Down` state.
enum TabletGesture {
    Idle,
    Down { last: Sample, brush: BrushState },
}

/// Simplified two-state machine for plain mouse input
#[derive(Clone, Copy)]
enum MouseGesture {
    Idle,
    Scribbling { last: Vec2 },
}

/// The painting core: persistent buffer plus everything needed to turn
/// input samples into composited strokes
pub struct PaintCanvas {
    buffer: RasterBuffer,
    valuators: ValuatorConfig,
    /// Carries the base hue/saturation/value between strokes; alpha,
    /// saturation, and width are rewritten per sample
    brush: BrushState,
    /// Pen width for the plain-mouse path
    pen_width: u32,
    /// Optional paper texture used by `clear`
    background: Option<RgbaImage>,
    tablet: TabletGesture,
    mouse: MouseGesture,
    modified: bool,
}

impl Default for PaintCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintCanvas {
    /// Canvas with the default configuration
    pub fn new() -> Self {
        Self::with_config(&CanvasConfig::default())
    }

    /// Canvas sized and styled by the given configuration
    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            buffer: RasterBuffer::new(config.width, config.height),
            valuators: ValuatorConfig::default(),
            brush: BrushState::with_color(Hsva::from_rgba(config.pen_color)),
            pen_width: config.pen_width,
            background: None,
            tablet: TabletGesture::Idle,
            mouse: MouseGesture::Idle,
            modified: false,
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    /// Whether the buffer has unsaved strokes
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether a tablet gesture is in progress
    pub fn is_device_down(&self) -> bool {
        matches!(self.tablet, TabletGesture::Down { .. })
    }

    pub fn valuators(&self) -> &ValuatorConfig {
        &self.valuators
    }

    pub fn pen_color(&self) -> Hsva {
        self.brush.color
    }

    // --- configuration ---------------------------------------------------

    /// Changes take effect on the next sample
    pub fn set_alpha_mode(&mut self, mode: ValuatorMode) {
        self.valuators.alpha = mode;
    }

    pub fn set_saturation_mode(&mut self, mode: ValuatorMode) {
        self.valuators.saturation = mode;
    }

    pub fn set_width_mode(&mut self, mode: ValuatorMode) {
        self.valuators.width = mode;
    }

    /// Base brush color; also the color of the plain-mouse pen
    pub fn set_pen_color(&mut self, color: Hsva) {
        self.brush.color = color;
    }

    /// Pen width for the plain-mouse path
    pub fn set_pen_width(&mut self, width: u32) {
        self.pen_width = width.max(1);
    }

    /// Paper texture used by [`clear`](Self::clear); `None` falls back to
    /// plain white
    pub fn set_background(&mut self, background: Option<RgbaImage>) {
        self.background = background;
    }

    // --- tablet gesture machine ------------------------------------------

    /// Device pressed down: open a session. Re-entrant presses while a
    /// session is active are ignored.
    pub fn on_press(&mut self, sample: Sample, _host: &mut dyn CanvasHost) {
        if let TabletGesture::Down { .. } = self.tablet {
            return;
        }
        let brush = derive_brush(&self.brush, &sample, &self.valuators);
        debug!("on_press: session opened at ({:.1}, {:.1})", sample.pos.x, sample.pos.y);
        self.tablet = TabletGesture::Down { last: sample, brush };
    }

    /// Device moved while down: derive the brush for the new sample and
    /// composite one segment
    pub fn on_move(&mut self, sample: Sample, host: &mut dyn CanvasHost) {
        let TabletGesture::Down { last, brush } = &self.tablet else {
            return;
        };

        let cur_brush = derive_brush(brush, &sample, &self.valuators);
        let outcome = render_segment(
            &mut self.buffer,
            last,
            brush,
            &sample,
            &cur_brush,
            sample.device,
        );

        if let Some(advisory) = outcome.advisory {
            host.advisory(advisory);
        }
        if !outcome.dirty.is_empty() {
            self.modified = true;
            host.request_redisplay(Some(outcome.dirty));
        }

        self.tablet = TabletGesture::Down {
            last: sample,
            brush: cur_brush,
        };
    }

    /// Device released: close the session and ask for a full repaint.
    /// No further compositing happens.
    ///
    /// The session only closes once no barrel buttons remain held
    /// (`sample.buttons == 0`); a release with buttons still down keeps
    /// the gesture alive, as the original widget does.
    pub fn on_release(&mut self, sample: Sample, host: &mut dyn CanvasHost) {
        if matches!(self.tablet, TabletGesture::Down { .. }) && sample.buttons == 0 {
            debug!("on_release: session closed");
            self.tablet = TabletGesture::Idle;
        }
        host.request_redisplay(None);
    }

    /// Tool entered or left tablet proximity; only the cursor changes
    pub fn on_proximity(
        &mut self,
        proximity: Proximity,
        device: DeviceKind,
        pointer: PointerKind,
        host: &mut dyn CanvasHost,
    ) {
        let glyph = match proximity {
            Proximity::Enter => CursorGlyph::for_device(device, pointer),
            Proximity::Leave => CursorGlyph::Arrow,
        };
        host.set_cursor(glyph);
    }

    // --- plain-mouse path ------------------------------------------------

    pub fn on_mouse_press(&mut self, pos: Vec2, _host: &mut dyn CanvasHost) {
        self.mouse = MouseGesture::Scribbling { last: pos };
    }

    pub fn on_mouse_move(&mut self, pos: Vec2, host: &mut dyn CanvasHost) {
        let MouseGesture::Scribbling { last } = self.mouse else {
            return;
        };
        let dirty = self.draw_mouse_line(last, pos);
        host.request_redisplay(Some(dirty));
        self.mouse = MouseGesture::Scribbling { last: pos };
    }

    /// The mouse path draws a final segment to the release point
    pub fn on_mouse_release(&mut self, pos: Vec2, host: &mut dyn CanvasHost) {
        let MouseGesture::Scribbling { last } = self.mouse else {
            return;
        };
        let dirty = self.draw_mouse_line(last, pos);
        host.request_redisplay(Some(dirty));
        self.mouse = MouseGesture::Idle;
    }

    fn draw_mouse_line(&mut self, from: Vec2, to: Vec2) -> DirtyRect {
        let width = self.pen_width as f32;
        stroke_line(&mut self.buffer, from, to, self.brush.color.to_rgba(), width);
        self.modified = true;
        DirtyRect::spanning(from, to).inflated(self.pen_width as i32 / 2 + 2)
    }

    // --- buffer lifecycle -------------------------------------------------

    /// Reset the buffer to the background pattern (plain white when none is
    /// configured) and mark it modified
    pub fn clear(&mut self, host: &mut dyn CanvasHost) {
        match &self.background {
            Some(pattern) => io::fill_background(&mut self.buffer, pattern),
            None => self.buffer.fill(PAPER_WHITE),
        }
        self.modified = true;
        host.request_redisplay(None);
    }

    /// Replace the buffer with the decoded image at `path`.
    ///
    /// All-or-nothing: on decode failure the current buffer is untouched.
    pub fn open(&mut self, path: &Path, host: &mut dyn CanvasHost) -> Result<(), CanvasError> {
        let loaded = io::load_buffer(path)?;
        self.buffer = loaded;
        self.modified = false;
        host.request_redisplay(None);
        Ok(())
    }

    /// Encode the buffer to `path`; the buffer is unchanged either way
    pub fn save(&self, path: &Path) -> Result<(), CanvasError> {
        io::save_buffer(&self.buffer, path)
    }

    /// Grow the buffer to cover a viewport that outgrew it.
    ///
    /// Existing content is preserved in the top-left; the margin beyond the
    /// viewport avoids reallocating on every small resize. The buffer never
    /// shrinks.
    pub fn grow_to_fit(&mut self, viewport: (u32, u32), host: &mut dyn CanvasHost) {
        if viewport.0 <= self.buffer.width && viewport.1 <= self.buffer.height {
            return;
        }
        let (width, height) =
            CanvasConfig::grown_size((self.buffer.width, self.buffer.height), viewport);
        debug!(
            "grow_to_fit: {}x{} -> {}x{}",
            self.buffer.width, self.buffer.height, width, height
        );
        self.buffer.grow_to(width, height);
        host.request_redisplay(None);
    }
}
