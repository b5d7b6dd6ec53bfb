// SPDX-License-Identifier: GPL-3.0-only

//! Controller fixtures shared by the handler tests

use crate::app::CaptureController;
use crate::backends::camera::{CameraBackend, FileCamera, PermissionState};
use crate::backends::geocoding::{AddressRecord, FixedGeocoder, ReverseGeocoder};
use crate::backends::location::{
    LocationFix, LocationProvider, LocationSource, ManualProvider, ProviderKind,
};
use crate::config::Config;
use crate::overlay::{OverlayRenderer, OverlayStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) fn gray_jpeg(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128]))
        .save(path)
        .unwrap();
}

pub(crate) struct Harness {
    pub dir: TempDir,
    pub config: Config,
    pub fix: Option<LocationFix>,
    pub address: AddressRecord,
    pub location_permission: PermissionState,
    pub provider: Arc<ManualProvider>,
    pub network: Arc<ManualProvider>,
}

impl Harness {
    /// Photos go to `<tmp>/photos`, the camera serves a 640×960 gray JPEG
    pub fn new(mut config: Config) -> Self {
        let dir = tempfile::tempdir().unwrap();
        config.output_dir = Some(dir.path().join("photos"));
        gray_jpeg(&dir.path().join("camera.jpg"), 640, 960);

        Self {
            dir,
            config,
            fix: None,
            address: AddressRecord::default(),
            location_permission: PermissionState::Granted,
            provider: Arc::new(ManualProvider::new(ProviderKind::Gps)),
            network: Arc::new(ManualProvider::new(ProviderKind::Network)),
        }
    }

    pub fn with_fix(mut self, fix: LocationFix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn with_address(mut self, address: AddressRecord) -> Self {
        self.address = address;
        self
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.dir.path().join("photos")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    pub fn controller(&self) -> CaptureController {
        let camera = FileCamera::new(self.dir.path().join("camera.jpg")).unwrap();
        self.controller_with_camera(Arc::new(camera))
    }

    pub fn controller_with_camera(&self, camera: Arc<dyn CameraBackend>) -> CaptureController {
        let mut providers: Vec<Arc<dyn LocationProvider>> =
            vec![self.provider.clone(), self.network.clone()];
        if let Some(fix) = self.fix {
            providers.push(Arc::new(ManualProvider::with_fix(fix)));
        }

        let location = LocationSource::new(providers, self.location_permission);
        let geocoder = ReverseGeocoder::new(Arc::new(FixedGeocoder::new(self.address.clone())));
        let renderer = OverlayRenderer::new(OverlayStyle::default(), None);

        CaptureController::with_renderer(self.config.clone(), camera, location, geocoder, renderer)
            .persist_to(self.config_path())
    }
}
