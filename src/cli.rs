// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Stamping an existing photo with the location overlay
//! - Finding and opening the latest capture
//! - Showing and toggling the saved settings

use gpspic::app::{CaptureController, Notice};
use gpspic::backends::camera::FileCamera;
use gpspic::backends::geocoding::{AddressRecord, FixedGeocoder, ReverseGeocoder};
use gpspic::backends::location::{
    LocationFix, LocationProvider, LocationSource, ManualProvider, ProviderKind,
};
use gpspic::config::Config;
use gpspic::errors::AppResult;
use gpspic::storage;
use std::path::PathBuf;
use std::sync::Arc;

/// Location and address given on the command line
#[derive(Debug, Default)]
pub struct StampLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: AddressRecord,
}

/// Settings that can be toggled from the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ToggleTarget {
    /// Cycle flash Off → On → Auto
    Flash,
    /// Switch back/front camera
    Camera,
    /// Cycle grid None → thirds → golden → square
    Grid,
    /// Turn the location overlay on or off
    Overlay,
}

fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Config::default_path().ok_or_else(|| "No config directory available".into())
}

fn controller_for(
    config: Config,
    photo: PathBuf,
    location: StampLocation,
) -> Result<CaptureController, Box<dyn std::error::Error>> {
    let camera = FileCamera::new(photo)?;

    let provider = ManualProvider::new(ProviderKind::Gps);
    if let (Some(latitude), Some(longitude)) = (location.latitude, location.longitude) {
        provider.push(LocationFix::new(latitude, longitude, ProviderKind::Gps));
    }
    let providers: Vec<Arc<dyn LocationProvider>> = vec![Arc::new(provider)];
    let source = LocationSource::new(providers, config.location_permission);
    let geocoder = ReverseGeocoder::new(Arc::new(FixedGeocoder::new(location.address)));

    Ok(CaptureController::new(
        config,
        Arc::new(camera),
        source,
        geocoder,
    ))
}

/// Stamp `photo` with the overlay and save it as a new capture
pub fn stamp_photo(
    photo: PathBuf,
    location: StampLocation,
    output: Option<PathBuf>,
    burn_grid: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !photo.is_file() {
        return Err(format!("Not a file: {}", photo.display()).into());
    }

    let mut config = Config::load();
    if let Some(dir) = output {
        config.output_dir = Some(dir);
    }
    config.burn_grid |= burn_grid;

    let controller = controller_for(config, photo, location)?;

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(controller.capture_photo())?;

    for notice in &outcome.notices {
        match notice {
            Notice::PhotoSaved { .. } => {}
            other => eprintln!("{}", other),
        }
    }
    println!("{}", outcome.path.display());
    Ok(())
}

/// Print the newest capture's path
pub fn print_latest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = Config::load().photos_dir();
    match storage::latest_capture(&dir) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(format!("No photos in {}", dir.display()).into()),
    }
}

/// Open the newest capture in the system image viewer
pub fn open_latest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = Config::load().photos_dir();
    let path = storage::latest_capture(&dir)
        .ok_or_else(|| format!("No photos in {}", dir.display()))?;
    open::that(&path)?;
    println!("Opened {}", path.display());
    Ok(())
}

/// Print the config file location and current settings
pub fn show_config() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path()?;
    let config = Config::load_from(&path);
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("# photos: {}", config.photos_dir().display());
    Ok(())
}

/// Controller used to change settings outside a capture
///
/// The file camera only records the settings it is given; nothing is captured.
fn settings_controller(path: PathBuf) -> Result<CaptureController, Box<dyn std::error::Error>> {
    let config = Config::load_from(&path);
    let source = config.photos_dir().join("camera.jpg");
    Ok(controller_for(config, source, StampLocation::default())?.persist_to(path))
}

/// Apply `target` through the controller and describe the new value
fn apply_toggle(controller: &mut CaptureController, target: ToggleTarget) -> AppResult<String> {
    let description = match target {
        ToggleTarget::Flash => format!("flash: {:?}", controller.toggle_flash()?),
        ToggleTarget::Camera => format!("camera: {:?}", controller.toggle_camera()?),
        ToggleTarget::Grid => format!("grid: {:?}", controller.cycle_grid()),
        ToggleTarget::Overlay => {
            let enabled = !controller.config().overlay_enabled;
            controller.set_overlay_enabled(enabled);
            format!("overlay: {}", if enabled { "on" } else { "off" })
        }
    };
    Ok(description)
}

/// Toggle a setting and save it
pub fn toggle(target: ToggleTarget) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = settings_controller(config_path()?)?;
    println!("{}", apply_toggle(&mut controller, target)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpspic::backends::camera::{CameraFacing, FlashMode, GridType, PermissionState};
    use gpspic::overlay::{OverlayRenderer, OverlayStyle};

    fn controller(camera: Arc<FileCamera>, config_path: PathBuf) -> CaptureController {
        let location = LocationSource::new(Vec::new(), PermissionState::Granted);
        let geocoder = ReverseGeocoder::new(Arc::new(FixedGeocoder::new(AddressRecord::default())));
        let renderer = OverlayRenderer::new(OverlayStyle::default(), None);
        CaptureController::with_renderer(Config::default(), camera, location, geocoder, renderer)
            .persist_to(config_path)
    }

    #[test]
    fn test_toggles_reach_camera_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let camera = Arc::new(FileCamera::new(dir.path().join("camera.jpg")).unwrap());
        let mut controller = controller(Arc::clone(&camera), path.clone());

        assert_eq!(apply_toggle(&mut controller, ToggleTarget::Flash).unwrap(), "flash: On");
        assert_eq!(camera.settings().flash_mode, FlashMode::On);

        apply_toggle(&mut controller, ToggleTarget::Camera).unwrap();
        assert_eq!(camera.settings().facing, CameraFacing::Front);

        apply_toggle(&mut controller, ToggleTarget::Grid).unwrap();
        assert_eq!(
            apply_toggle(&mut controller, ToggleTarget::Overlay).unwrap(),
            "overlay: off"
        );

        let saved = Config::load_from(&path);
        assert_eq!(saved.flash_mode, FlashMode::On);
        assert_eq!(saved.camera_facing, CameraFacing::Front);
        assert_eq!(saved.grid_type, GridType::RuleOfThirds);
        assert!(!saved.overlay_enabled);
    }
}
