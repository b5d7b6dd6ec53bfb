// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera port

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flash operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Flash never fires
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Camera decides based on scene brightness
    Auto,
}

impl FlashMode {
    /// Cycle to the next mode: Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }
}

/// Which physical camera to capture from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    /// Switch between back and front cameras
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }
}

/// Compositional guide drawn over the preview and optionally burnt into the photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridType {
    #[default]
    None,
    /// Lines at 1/3 and 2/3
    RuleOfThirds,
    /// Lines at the golden section (0.382 / 0.618)
    Golden,
    /// Evenly spaced 4x4 cells
    Square,
}

impl GridType {
    /// Cycle to the next grid: None -> RuleOfThirds -> Golden -> Square -> None
    pub fn next(self) -> Self {
        match self {
            GridType::None => GridType::RuleOfThirds,
            GridType::RuleOfThirds => GridType::Golden,
            GridType::Golden => GridType::Square,
            GridType::Square => GridType::None,
        }
    }

    /// Positions of the guide lines as fractions of the frame edge
    ///
    /// The same fractions are used for vertical and horizontal lines.
    pub fn fractions(&self) -> &'static [f32] {
        match self {
            GridType::None => &[],
            GridType::RuleOfThirds => &[1.0 / 3.0, 2.0 / 3.0],
            GridType::Golden => &[0.382, 0.618],
            GridType::Square => &[0.25, 0.5, 0.75],
        }
    }
}

/// Settings the camera port is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureSettings {
    pub flash_mode: FlashMode,
    pub facing: CameraFacing,
}

/// Platform permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionState {
    #[default]
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// A photo the camera pipeline has already written to disk, decoded to RGBA
///
/// The controller owns this from the moment the camera reports completion
/// until the composited result has been persisted.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub pixels: RgbaImage,
    pub source_path: PathBuf,
}

impl CapturedPhoto {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
