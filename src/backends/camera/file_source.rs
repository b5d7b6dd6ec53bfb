// SPDX-License-Identifier: GPL-3.0-only

//! Still-image file source acting as a camera
//!
//! Serves an existing image file as the "captured" photo. Used by the CLI to
//! stamp photos taken elsewhere and by tests that need a deterministic camera.

use super::CameraBackend;
use super::types::CaptureSettings;
use crate::constants::{DEFAULT_JPEG_QUALITY, file_formats};
use crate::errors::CaptureError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Camera backend that "captures" a fixed image file
pub struct FileCamera {
    source: PathBuf,
    settings: Mutex<CaptureSettings>,
}

impl FileCamera {
    /// Create a file camera, rejecting paths without a supported image extension
    pub fn new(source: impl Into<PathBuf>) -> Result<Self, CaptureError> {
        let source = source.into();
        let extension = lowercase_extension(&source);

        if !file_formats::is_image_extension(&extension) {
            return Err(CaptureError::Failed(format!(
                "Unsupported file format: {}",
                extension
            )));
        }

        Ok(Self {
            source,
            settings: Mutex::new(CaptureSettings::default()),
        })
    }

    /// Path of the image this camera serves
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Settings most recently applied through [`CameraBackend::configure`]
    pub fn settings(&self) -> CaptureSettings {
        self.settings
            .lock()
            .map(|s| *s)
            .unwrap_or_default()
    }
}

impl CameraBackend for FileCamera {
    fn configure(&self, settings: CaptureSettings) -> Result<(), CaptureError> {
        let mut current = self
            .settings
            .lock()
            .map_err(|_| CaptureError::Failed("camera settings lock poisoned".into()))?;
        *current = settings;

        debug!(
            flash = ?settings.flash_mode,
            facing = ?settings.facing,
            "File camera configured"
        );
        Ok(())
    }

    fn capture_to_file(&self, destination: &Path) -> Result<(), CaptureError> {
        info!(
            source = %self.source.display(),
            destination = %destination.display(),
            "Capturing from file source"
        );

        if self.source == destination {
            return Ok(());
        }

        let extension = lowercase_extension(&self.source);
        if extension == "jpg" || extension == "jpeg" {
            std::fs::copy(&self.source, destination)
                .map_err(|e| CaptureError::Failed(e.to_string()))?;
            return Ok(());
        }

        // Other formats are transcoded so the destination is always a JPEG
        let image = image::open(&self.source)
            .map_err(|e| CaptureError::Failed(format!("Failed to load image: {}", e)))?
            .to_rgb8();

        let file = std::fs::File::create(destination)
            .map_err(|e| CaptureError::Failed(e.to_string()))?;
        let mut writer = std::io::BufWriter::new(file);
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, DEFAULT_JPEG_QUALITY);
        image
            .write_with_encoder(encoder)
            .map_err(|e| CaptureError::Failed(format!("JPEG encoding failed: {}", e)))?;
        writer
            .flush()
            .map_err(|e| CaptureError::Failed(e.to_string()))?;

        Ok(())
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
