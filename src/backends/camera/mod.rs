// SPDX-License-Identifier: GPL-3.0-only

//! Camera port
//!
//! The capture pipeline itself (sensor, ISP, JPEG encoder) belongs to the
//! platform. This crate only needs it to write a photo to a path it chooses and
//! to accept flash/facing changes.

pub mod file_source;
pub mod types;

pub use file_source::FileCamera;
pub use types::{CameraFacing, CaptureSettings, CapturedPhoto, FlashMode, GridType, PermissionState};

use crate::errors::CaptureError;
use std::path::Path;

/// A camera capture pipeline
///
/// Both methods may block; callers run them on a blocking worker.
pub trait CameraBackend: Send + Sync {
    /// Apply flash and facing settings, restarting the pipeline if needed
    fn configure(&self, settings: CaptureSettings) -> Result<(), CaptureError>;

    /// Capture a still and write it to `destination` as a JPEG
    ///
    /// Returns once the file is completely written ("photo saved").
    fn capture_to_file(&self, destination: &Path) -> Result<(), CaptureError>;
}
