//! Ebru painting core - tablet stroke rendering onto a raster buffer
//!
//! This crate provides the core of a tablet painting canvas:
//! - [`types::Sample`] - One raw tablet/pointer input observation
//! - [`valuator`] - Mapping from physical input quantities to brush parameters
//! - [`raster::RasterBuffer`] - The persistent RGBA canvas buffer
//! - [`render`] - Per-device stroke compositing strategies
//! - [`session::PaintCanvas`] - Gesture state machine and host-facing operations
//! - [`host::CanvasHost`] - The seam toward the embedding GUI shell
//!
//! The crate has no dependency on any UI toolkit; a host delivers input
//! samples and configuration changes, and receives dirty-rectangle redisplay
//! requests, cursor glyph changes, and non-fatal advisories in return.

pub mod constants;
pub mod cursor;
pub mod error;
pub mod host;
pub mod io;
pub mod raster;
pub mod render;
pub mod session;
pub mod types;
pub mod valuator;

pub use constants::*;
pub use cursor::*;
pub use error::*;
pub use host::*;
pub use io::*;
pub use raster::*;
pub use render::*;
pub use session::*;
pub use types::*;
pub use valuator::*;
