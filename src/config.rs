// SPDX-License-Identifier: GPL-3.0-only

//! Persistent user configuration
//!
//! Stored as JSON at `<config dir>/gpspic/config.json`. A missing file means
//! defaults; an unreadable one is logged and replaced by defaults on the next
//! save.

use crate::backends::camera::{CameraFacing, FlashMode, GridType, PermissionState};
use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_SAVE_FOLDER};
use crate::errors::{AppError, AppResult};
use crate::overlay::OverlayStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "gpspic";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where captures are written (default: `<Pictures>/GPSPic`)
    pub output_dir: Option<PathBuf>,
    /// Burn the location overlay into captures
    pub overlay_enabled: bool,
    /// Burn the selected grid guides into captures
    pub burn_grid: bool,
    /// Last selected flash mode
    pub flash_mode: FlashMode,
    /// Last selected camera
    pub camera_facing: CameraFacing,
    /// Last selected grid guide
    pub grid_type: GridType,
    /// TrueType font for overlay text (default: first system font found)
    pub font_path: Option<PathBuf>,
    /// Image drawn in the overlay's map region (default: built-in tile)
    pub map_image: Option<PathBuf>,
    /// JPEG quality for composited photos
    pub jpeg_quality: u8,
    /// Camera permission as last reported by the platform
    pub camera_permission: PermissionState,
    /// Location permission as last reported by the platform
    pub location_permission: PermissionState,
    /// Overlay text sizes, colors and spacing
    pub overlay_style: OverlayStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            overlay_enabled: true,
            burn_grid: false,
            flash_mode: FlashMode::default(),
            camera_facing: CameraFacing::default(),
            grid_type: GridType::default(),
            font_path: None,
            map_image: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            camera_permission: PermissionState::default(),
            location_permission: PermissionState::default(),
            overlay_style: OverlayStyle::default(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults when missing or invalid
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Save to the default location
    pub fn save(&self) -> AppResult<()> {
        let path = Self::default_path()
            .ok_or_else(|| AppError::Config("No config directory available".to_string()))?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Directory captures are written to
    pub fn photos_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_photo_dir)
    }
}

/// `<Pictures>/GPSPic`, or `./GPSPic` when no picture/home dir is known
pub fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}
