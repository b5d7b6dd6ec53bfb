// SPDX-License-Identifier: GPL-3.0-only

//! Shutter handling
//!
//! The camera always writes its photo first. The overlay step then works on
//! that file: any failure from locating through saving leaves the camera's
//! output in place and is reported as a notice, never as an error.

use crate::app::CaptureController;
use crate::app::state::{CaptureOutcome, CapturePhase, Notice, PermissionKind, PhaseGuard};
use crate::backends::camera::CapturedPhoto;
use crate::backends::geocoding::AddressRecord;
use crate::errors::{AppResult, CaptureError, OverlayError};
use crate::overlay::{MapPlaceholder, OverlayContent};
use crate::pipelines::photo::{PhotoCapture, PhotoCompositor};
use crate::storage;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{error, info, warn};

impl CaptureController {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Take a photo, burning the location overlay into it when enabled
    ///
    /// Fails only when no photo was produced: missing camera permission, a
    /// capture already in flight, or a camera/storage error.
    pub async fn capture_photo(&self) -> AppResult<CaptureOutcome> {
        if !self.config.camera_permission.is_granted() {
            warn!("Camera permission not granted");
            return Err(CaptureError::PermissionDenied.into());
        }

        let guard = PhaseGuard::try_begin(&self.phase).ok_or(CaptureError::Busy)?;

        let photos_dir = self.config.photos_dir();
        tokio::fs::create_dir_all(&photos_dir).await?;

        let overlay_enabled = self.config.overlay_enabled;
        let captured_at = Local::now();
        let path = photos_dir.join(storage::capture_file_name(&captured_at, overlay_enabled));

        info!(path = %path.display(), overlay = overlay_enabled, "Capturing photo...");
        let photo = match PhotoCapture::capture(Arc::clone(&self.camera), path.clone()).await {
            Ok(photo) => photo,
            Err(e) => {
                error!(error = %e, "Photo capture failed");
                return Err(e.into());
            }
        };

        let mut notices = Vec::new();
        let overlay_applied = if overlay_enabled {
            match self
                .apply_overlay(&guard, photo, &captured_at, &mut notices)
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, path = %path.display(), "Failed to save overlayed image");
                    notices.push(Notice::OverlayFailed(e.to_string()));
                    false
                }
            }
        } else {
            false
        };

        guard.advance(CapturePhase::Persisted);
        notices.push(Notice::PhotoSaved {
            path: path.clone(),
            overlay: overlay_applied,
        });
        info!(path = %path.display(), overlay = overlay_applied, "Capture complete");
        drop(guard);

        self.refresh_thumbnail().await;

        Ok(CaptureOutcome {
            path,
            overlay_applied,
            notices,
        })
    }

    /// Locate, geocode, render and composite, then replace the photo file
    async fn apply_overlay(
        &self,
        guard: &PhaseGuard,
        photo: CapturedPhoto,
        captured_at: &DateTime<Local>,
        notices: &mut Vec<Notice>,
    ) -> AppResult<()> {
        guard.advance(CapturePhase::LocationLookup);
        let fix = if self.location.permission().is_granted() {
            self.current_fix()
        } else {
            notices.push(Notice::PermissionDenied(PermissionKind::Location));
            None
        };
        if fix.is_none() && self.location.permission().is_granted() {
            warn!("No location fix, overlay uses placeholders");
            notices.push(Notice::LocationUnavailable);
        }

        guard.advance(CapturePhase::Geocoding);
        let address = match &fix {
            Some(fix) => {
                let address = self
                    .geocoder
                    .resolve_async(fix.latitude, fix.longitude)
                    .await;
                if address.is_empty() {
                    notices.push(Notice::GeocodingFailed);
                }
                address
            }
            None => AddressRecord::default(),
        };

        guard.advance(CapturePhase::Rendering);
        let map = match &self.config.map_image {
            Some(path) => MapPlaceholder::Image(path.clone()),
            None => MapPlaceholder::Builtin,
        };
        let content = OverlayContent::assemble(fix.as_ref(), &address, captured_at, map);
        let rendered = self
            .renderer
            .render_async(content, photo.width() as f32, photo.height() as f32)
            .await?;

        guard.advance(CapturePhase::Compositing);
        let compositor = if self.config.burn_grid {
            PhotoCompositor::with_grid(self.config.grid_type)
        } else {
            PhotoCompositor::new()
        };
        let CapturedPhoto {
            pixels,
            source_path,
        } = photo;
        let composited = tokio::task::spawn_blocking(move || {
            compositor.composite(&pixels, &rendered.image, rendered.size)
        })
        .await
        .map_err(|e| OverlayError::TaskFailed(e.to_string()))??;

        self.encoder
            .save_in(Arc::clone(&self.store), composited, source_path)
            .await?;
        Ok(())
    }
}
