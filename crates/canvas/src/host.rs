//! The seam between the painting core and the embedding GUI shell
//!
//! The core never calls into a toolkit directly; everything it wants from
//! the outside world goes through [`CanvasHost`]. A windowed shell maps
//! these onto widget repaints, cursor swaps, and a status bar. Hosts may
//! coalesce redisplay requests; the core never assumes the repaint happens
//! synchronously.

use crate::cursor::CursorGlyph;
use crate::error::Advisory;
use crate::types::DirtyRect;

/// Callbacks from the core toward the host
pub trait CanvasHost {
    /// Ask the host to repaint a region of the canvas; `None` means the
    /// whole widget
    fn request_redisplay(&mut self, region: Option<DirtyRect>);

    /// Ask the host to swap the pointer image
    fn set_cursor(&mut self, _glyph: CursorGlyph) {}

    /// Surface a non-fatal condition (unsupported device, etc.)
    fn advisory(&mut self, _advisory: Advisory) {}
}

/// Host that ignores everything; for headless use of the core
pub struct NullHost;

impl CanvasHost for NullHost {
    fn request_redisplay(&mut self, _region: Option<DirtyRect>) {}
}

/// Host that records every callback, in order; used by tests and useful
/// when debugging an embedding
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub redisplays: Vec<Option<DirtyRect>>,
    pub cursors: Vec<CursorGlyph>,
    pub advisories: Vec<Advisory>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of all requested regions; `None` if any request was a full
    /// redisplay
    pub fn combined_dirty(&self) -> Option<DirtyRect> {
        let mut combined = DirtyRect::EMPTY;
        for region in &self.redisplays {
            match region {
                Some(rect) => combined = combined.union(*rect),
                None => return None,
            }
        }
        Some(combined)
    }
}

impl CanvasHost for RecordingHost {
    fn request_redisplay(&mut self, region: Option<DirtyRect>) {
        self.redisplays.push(region);
    }

    fn set_cursor(&mut self, glyph: CursorGlyph) {
        self.cursors.push(glyph);
    }

    fn advisory(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_combines_dirty_rects() {
        let mut host = RecordingHost::new();
        host.request_redisplay(Some(DirtyRect::new(0, 0, 10, 10)));
        host.request_redisplay(Some(DirtyRect::new(20, 20, 5, 5)));
        assert_eq!(host.combined_dirty(), Some(DirtyRect::new(0, 0, 25, 25)));

        host.request_redisplay(None);
        assert_eq!(host.combined_dirty(), None);
    }
}
