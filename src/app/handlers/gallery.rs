// SPDX-License-Identifier: GPL-3.0-only

//! Gallery button handlers

use crate::app::CaptureController;
use crate::errors::{AppError, AppResult};
use crate::storage::{self, Thumbnail};
use std::path::PathBuf;
use tracing::{error, info};

impl CaptureController {
    // =========================================================================
    // Gallery Handlers
    // =========================================================================

    /// Reload the gallery thumbnail from the newest capture
    pub async fn refresh_thumbnail(&self) -> Option<Thumbnail> {
        let thumbnail = storage::load_latest_thumbnail(self.config.photos_dir()).await;
        if let Ok(mut slot) = self.thumbnail.lock() {
            slot.clone_from(&thumbnail);
        }
        thumbnail
    }

    /// Thumbnail from the last refresh
    pub fn thumbnail(&self) -> Option<Thumbnail> {
        self.thumbnail.lock().ok().and_then(|t| t.clone())
    }

    /// Newest capture on disk
    pub fn latest_photo(&self) -> Option<PathBuf> {
        storage::latest_capture(&self.config.photos_dir())
    }

    /// Open the newest capture in the system image viewer
    pub fn open_latest_in_gallery(&self) -> AppResult<PathBuf> {
        let path = self
            .latest_photo()
            .ok_or_else(|| AppError::Storage("No photos taken yet".to_string()))?;

        info!(path = %path.display(), "Opening photo in gallery");
        if let Err(e) = open::that(&path) {
            error!(error = %e, path = %path.display(), "Failed to open gallery");
            return Err(AppError::Storage(format!("Failed to open gallery: {}", e)));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::app::handlers::test_support::Harness;
    use crate::config::Config;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_thumbnail_follows_captures() {
        let harness = Harness::new(Config::default());
        let controller = harness.controller();

        assert!(controller.refresh_thumbnail().await.is_none());
        assert!(controller.latest_photo().is_none());

        let outcome = controller.capture_photo().await.unwrap();
        let thumbnail = controller.thumbnail().unwrap();
        assert_eq!(thumbnail.path, outcome.path);
        assert_eq!(controller.latest_photo(), Some(outcome.path));
    }

    #[test]
    fn test_open_without_photos_fails() {
        let harness = Harness::new(Config::default());
        assert!(matches!(
            harness.controller().open_latest_in_gallery(),
            Err(AppError::Storage(_))
        ));
    }
}
