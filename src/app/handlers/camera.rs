// SPDX-License-Identifier: GPL-3.0-only

//! Camera toggle handlers
//!
//! Flash cycles Off → On → Auto, the camera switches between back and front,
//! and the grid cycles None → thirds → golden → square. Each change is applied
//! to the camera (where relevant) and saved to the config.

use crate::app::CaptureController;
use crate::backends::camera::{CameraFacing, CaptureSettings, FlashMode, GridType};
use crate::errors::AppResult;
use tracing::info;

impl CaptureController {
    // =========================================================================
    // Camera Toggle Handlers
    // =========================================================================

    fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            flash_mode: self.config.flash_mode,
            facing: self.config.camera_facing,
        }
    }

    /// Apply `settings` to the camera and keep them only if it accepted them
    fn apply_capture_settings(&mut self, settings: CaptureSettings) -> AppResult<()> {
        self.camera.configure(settings)?;
        self.config.flash_mode = settings.flash_mode;
        self.config.camera_facing = settings.facing;
        self.persist_config();
        Ok(())
    }

    /// Advance to the next flash mode
    pub fn toggle_flash(&mut self) -> AppResult<FlashMode> {
        let settings = CaptureSettings {
            flash_mode: self.config.flash_mode.next(),
            ..self.capture_settings()
        };
        self.apply_capture_settings(settings)?;
        info!(flash = ?settings.flash_mode, "Flash mode changed");
        Ok(settings.flash_mode)
    }

    /// Switch between the back and front camera
    pub fn toggle_camera(&mut self) -> AppResult<CameraFacing> {
        let settings = CaptureSettings {
            facing: self.config.camera_facing.toggled(),
            ..self.capture_settings()
        };
        self.apply_capture_settings(settings)?;
        info!(facing = ?settings.facing, "Camera switched");
        Ok(settings.facing)
    }

    /// Advance to the next grid guide
    pub fn cycle_grid(&mut self) -> GridType {
        self.config.grid_type = self.config.grid_type.next();
        info!(grid = ?self.config.grid_type, "Grid changed");
        self.persist_config();
        self.config.grid_type
    }

    /// Whether captures carry the location overlay
    pub fn set_overlay_enabled(&mut self, enabled: bool) {
        self.config.overlay_enabled = enabled;
        info!(enabled, "Location overlay toggled");
        self.persist_config();
    }

    /// Whether the selected grid is burnt into overlay captures
    pub fn set_burn_grid(&mut self, enabled: bool) {
        self.config.burn_grid = enabled;
        self.persist_config();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::handlers::test_support::Harness;
    use crate::backends::camera::{
        CameraBackend, CameraFacing, CaptureSettings, FlashMode, GridType,
    };
    use crate::config::Config;
    use crate::errors::{AppError, CaptureError};
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn test_flash_cycles_and_persists() {
        let harness = Harness::new(Config::default());
        let mut controller = harness.controller();

        assert_eq!(controller.toggle_flash().unwrap(), FlashMode::On);
        assert_eq!(controller.toggle_flash().unwrap(), FlashMode::Auto);
        assert_eq!(
            Config::load_from(&harness.config_path()).flash_mode,
            FlashMode::Auto
        );
        assert_eq!(controller.toggle_flash().unwrap(), FlashMode::Off);
    }

    #[test]
    fn test_camera_toggle_round_trips() {
        let harness = Harness::new(Config::default());
        let mut controller = harness.controller();

        assert_eq!(controller.toggle_camera().unwrap(), CameraFacing::Front);
        assert_eq!(controller.config().camera_facing, CameraFacing::Front);
        assert_eq!(controller.toggle_camera().unwrap(), CameraFacing::Back);
    }

    #[test]
    fn test_rejected_settings_are_not_kept() {
        struct NoFrontCamera;
        impl CameraBackend for NoFrontCamera {
            fn configure(&self, settings: CaptureSettings) -> Result<(), CaptureError> {
                match settings.facing {
                    CameraFacing::Back => Ok(()),
                    CameraFacing::Front => Err(CaptureError::Failed("no front camera".into())),
                }
            }
            fn capture_to_file(&self, _: &Path) -> Result<(), CaptureError> {
                Ok(())
            }
        }

        let harness = Harness::new(Config::default());
        let mut controller = harness.controller_with_camera(Arc::new(NoFrontCamera));

        assert!(matches!(
            controller.toggle_camera(),
            Err(AppError::Capture(CaptureError::Failed(_)))
        ));
        assert_eq!(controller.config().camera_facing, CameraFacing::Back);
    }

    #[test]
    fn test_grid_cycle() {
        let harness = Harness::new(Config::default());
        let mut controller = harness.controller();

        let seen: Vec<GridType> = (0..4).map(|_| controller.cycle_grid()).collect();
        assert_eq!(
            seen,
            vec![
                GridType::RuleOfThirds,
                GridType::Golden,
                GridType::Square,
                GridType::None
            ]
        );
    }

    #[test]
    fn test_overlay_toggle_persists() {
        let harness = Harness::new(Config::default());
        let mut controller = harness.controller();
        controller.set_overlay_enabled(false);
        assert!(!Config::load_from(&harness.config_path()).overlay_enabled);
    }
}
