// SPDX-License-Identifier: MPL-2.0

//! Capture controller
//!
//! Owns the ports (camera, location, geocoder) and the overlay pipeline, and
//! turns user actions into work on them.
//!
//! # Architecture
//!
//! - `state`: capture phase machine, notices and outcomes
//! - `handlers::capture`: shutter flow (capture → locate → geocode → render → composite → save)
//! - `handlers::camera`: flash, camera and grid toggles
//! - `handlers::location`: live location subscription
//! - `handlers::gallery`: latest-capture thumbnail and gallery launch
//!
//! Toggles take `&mut self`; a capture only needs `&self`, so a second
//! shutter press while one capture is in flight reaches the busy check and is
//! rejected instead of starting a parallel pipeline.

mod handlers;
mod state;

pub use state::{CaptureOutcome, CapturePhase, Notice, PermissionKind};

use crate::backends::camera::{CameraBackend, CaptureSettings};
use crate::backends::geocoding::ReverseGeocoder;
use crate::backends::location::{LiveFixes, LocationSource, Subscription};
use crate::config::Config;
use crate::overlay::OverlayRenderer;
use crate::pipelines::photo::{AtomicFileStore, PhotoEncoder, PhotoStore};
use crate::storage::Thumbnail;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

pub struct CaptureController {
    config: Config,
    /// Where toggles are persisted; `None` keeps them in memory only
    config_path: Option<PathBuf>,
    camera: Arc<dyn CameraBackend>,
    location: LocationSource,
    geocoder: ReverseGeocoder,
    renderer: OverlayRenderer,
    encoder: PhotoEncoder,
    store: Arc<dyn PhotoStore>,
    phase: Arc<Mutex<CapturePhase>>,
    subscription: Option<Subscription>,
    live_fixes: Arc<Mutex<LiveFixes>>,
    thumbnail: Mutex<Option<Thumbnail>>,
}

impl CaptureController {
    /// Create a controller; the overlay font is resolved from `config`
    pub fn new(
        config: Config,
        camera: Arc<dyn CameraBackend>,
        location: LocationSource,
        geocoder: ReverseGeocoder,
    ) -> Self {
        let renderer = OverlayRenderer::from_config(&config);
        Self::with_renderer(config, camera, location, geocoder, renderer)
    }

    /// Create a controller with an explicit renderer
    pub fn with_renderer(
        config: Config,
        camera: Arc<dyn CameraBackend>,
        location: LocationSource,
        geocoder: ReverseGeocoder,
        renderer: OverlayRenderer,
    ) -> Self {
        let settings = CaptureSettings {
            flash_mode: config.flash_mode,
            facing: config.camera_facing,
        };
        if let Err(e) = camera.configure(settings) {
            error!(error = %e, "Failed to apply saved camera settings");
        }

        info!(
            photos_dir = %config.photos_dir().display(),
            overlay = config.overlay_enabled,
            "Capture controller ready"
        );

        Self {
            encoder: PhotoEncoder::new(config.jpeg_quality),
            store: Arc::new(AtomicFileStore),
            config,
            config_path: None,
            camera,
            location,
            geocoder,
            renderer,
            phase: Arc::new(Mutex::new(CapturePhase::Idle)),
            subscription: None,
            live_fixes: Arc::new(Mutex::new(LiveFixes::default())),
            thumbnail: Mutex::new(None),
        }
    }

    /// Write finished photos through `store` instead of the local disk
    pub fn with_photo_store(mut self, store: Arc<dyn PhotoStore>) -> Self {
        self.store = store;
        self
    }

    /// Persist toggles to `path` whenever they change
    pub fn persist_to(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Phase of the capture in flight, `Idle` if none
    pub fn phase(&self) -> CapturePhase {
        state::current_phase(&self.phase)
    }

    fn persist_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            error!(error = %e, path = %path.display(), "Failed to save config");
        }
    }
}
