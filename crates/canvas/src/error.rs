//! Error taxonomy and non-fatal advisories

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::DeviceKind;

/// Recoverable failures of the buffer lifecycle operations.
///
/// None of these are fatal: the buffer is left untouched and the host
/// decides whether to re-prompt.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to decode image at {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode image to {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Non-fatal condition surfaced to the host during rendering.
///
/// Advisories are informational only; they never abort the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// The device has no rendering strategy; the segment was skipped
    UnsupportedDevice(DeviceKind),
    /// The device was not recognized; stylus rendering was used instead
    UnknownDevice,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::UnsupportedDevice(device) => {
                write!(f, "input device {device:?} is not supported")
            }
            Advisory::UnknownDevice => {
                write!(f, "unknown tablet device - treating as stylus")
            }
        }
    }
}
