// SPDX-License-Identifier: GPL-3.0-only

//! Overlay compositing
//!
//! Pure pixel transform: the output has the photo's dimensions, the overlay
//! sits centered horizontally, 48 px above the bottom edge. Writing the result
//! is left to [`super::encoding`].

use crate::backends::camera::GridType;
use crate::constants::overlay::BOTTOM_MARGIN_PX;
use crate::errors::OverlayError;
use crate::overlay::OverlaySize;
use crate::overlay::grid::draw_grid;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Places a rendered overlay (and optional grid guides) onto a photo
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoCompositor {
    grid: GridType,
}

impl PhotoCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also burn `grid` into the photo, beneath the overlay
    pub fn with_grid(grid: GridType) -> Self {
        Self { grid }
    }

    /// Top-left corner of an `overlay_width` × `overlay_height` overlay
    pub fn anchor(
        photo_width: u32,
        photo_height: u32,
        overlay_width: u32,
        overlay_height: u32,
    ) -> (i64, i64) {
        let x = (photo_width as i64 - overlay_width as i64) / 2;
        let y = photo_height as i64 - overlay_height as i64 - BOTTOM_MARGIN_PX;
        (x, y)
    }

    /// Composite `overlay` onto a copy of `photo`
    ///
    /// If the overlay buffer does not already have `overlay_size` (rounded down
    /// to whole pixels) it is resized to it first.
    pub fn composite(
        &self,
        photo: &RgbaImage,
        overlay: &RgbaImage,
        overlay_size: OverlaySize,
    ) -> Result<RgbaImage, OverlayError> {
        let (photo_width, photo_height) = photo.dimensions();
        if photo_width == 0 || photo_height == 0 {
            return Err(OverlayError::EmptyCanvas);
        }
        if overlay.width() == 0 || overlay.height() == 0 {
            return Err(OverlayError::InvalidBuffer("overlay has no pixels".into()));
        }

        let mut output = photo.clone();
        draw_grid(&mut output, self.grid);

        let (target_width, target_height) = overlay_size.pixel_dims();
        if target_width == 0 || target_height == 0 {
            return Err(OverlayError::InvalidBuffer("overlay size below one pixel".into()));
        }
        let resized;
        let overlay = if overlay.dimensions() == (target_width, target_height) {
            overlay
        } else {
            resized = imageops::resize(overlay, target_width, target_height, FilterType::Triangle);
            &resized
        };

        let (x, y) = Self::anchor(photo_width, photo_height, overlay.width(), overlay.height());
        debug!(
            photo_width,
            photo_height,
            overlay_width = overlay.width(),
            overlay_height = overlay.height(),
            x,
            y,
            grid = ?self.grid,
            "Compositing overlay"
        );

        imageops::overlay(&mut output, overlay, x, y);
        Ok(output)
    }
}
