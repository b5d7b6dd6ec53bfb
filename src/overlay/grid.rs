// SPDX-License-Identifier: GPL-3.0-only

//! Composition grid guides burnt into the photo

use super::renderer::{PixelRect, fill_rect};
use crate::backends::camera::GridType;
use image::RgbaImage;

const LINE_COLOR: [u8; 4] = [255, 255, 255, 110];

/// Line thickness for a photo of the given shorter side
fn thickness(short_side: u32) -> u32 {
    (short_side / 400).max(1)
}

/// Draw the vertical and horizontal guides of `grid` across the whole canvas
pub fn draw_grid(canvas: &mut RgbaImage, grid: GridType) {
    let fractions = grid.fractions();
    if fractions.is_empty() {
        return;
    }

    let (width, height) = canvas.dimensions();
    let line = thickness(width.min(height));

    for &f in fractions {
        let x = ((width as f32 * f).round() as u32).saturating_sub(line / 2);
        fill_rect(canvas, PixelRect::new(x, 0, line, height), LINE_COLOR);

        let y = ((height as f32 * f).round() as u32).saturating_sub(line / 2);
        fill_rect(canvas, PixelRect::new(0, y, width, line), LINE_COLOR);
    }
}
