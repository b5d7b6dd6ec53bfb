// SPDX-License-Identifier: MPL-2.0

//! Photo capture through the camera port
//!
//! The camera writes its JPEG to disk first; only after it reports completion
//! is the file decoded for compositing.

use crate::backends::camera::{CameraBackend, CapturedPhoto};
use crate::errors::CaptureError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Capture a photo to `destination` and decode it
    ///
    /// Runs on the blocking pool since both the camera call and decoding block.
    pub async fn capture(
        camera: Arc<dyn CameraBackend>,
        destination: PathBuf,
    ) -> Result<CapturedPhoto, CaptureError> {
        info!(destination = %destination.display(), "Capturing photo");

        tokio::task::spawn_blocking(move || {
            camera.capture_to_file(&destination)?;
            Self::decode(&destination)
        })
        .await
        .map_err(|e| CaptureError::Failed(format!("Capture task error: {}", e)))?
    }

    /// Decode a photo the camera has written
    pub fn decode(path: &Path) -> Result<CapturedPhoto, CaptureError> {
        let pixels = image::open(path)
            .map_err(|e| CaptureError::DecodeFailed(format!("{}: {}", path.display(), e)))?
            .to_rgba8();

        debug!(
            width = pixels.width(),
            height = pixels.height(),
            path = %path.display(),
            "Captured photo decoded"
        );

        Ok(CapturedPhoto {
            pixels,
            source_path: path.to_path_buf(),
        })
    }
}
