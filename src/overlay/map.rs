// SPDX-License-Identifier: GPL-3.0-only

//! Map region of the overlay
//!
//! No tile service is queried. The region shows either a drawn street tile
//! with a pin or an image the user configured.

use super::layout::Region;
use super::renderer::{PixelRect, fill_rect};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;
use tracing::warn;

const LAND: [u8; 4] = [233, 229, 220, 255];
const PARK: [u8; 4] = [200, 228, 188, 255];
const WATER: [u8; 4] = [168, 208, 238, 255];
const STREET: [u8; 4] = [255, 255, 255, 255];
const BORDER: [u8; 4] = [120, 120, 120, 255];
const PIN: [u8; 4] = [219, 68, 55, 255];

/// Fill `region` with the map placeholder
///
/// An image that cannot be loaded falls back to the drawn tile.
pub fn draw(canvas: &mut RgbaImage, region: &Region, image_path: Option<&Path>) {
    let rect = PixelRect::from_region(region);
    if rect.is_empty() {
        return;
    }

    if let Some(path) = image_path {
        match draw_image(canvas, rect, path) {
            Ok(()) => return,
            Err(e) => warn!(error = %e, "Map image unusable, drawing placeholder tile"),
        }
    }

    draw_tile(canvas, rect);
}

fn draw_image(canvas: &mut RgbaImage, rect: PixelRect, path: &Path) -> Result<(), String> {
    let tile = image::open(path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?
        .resize_to_fill(rect.width, rect.height, FilterType::Triangle)
        .to_rgba8();

    imageops::replace(canvas, &tile, rect.x as i64, rect.y as i64);
    Ok(())
}

fn draw_tile(canvas: &mut RgbaImage, rect: PixelRect) {
    let PixelRect {
        x,
        y,
        width: w,
        height: h,
    } = rect;

    fill_rect(canvas, rect, LAND);
    fill_rect(canvas, PixelRect::new(x, y + h * 3 / 5, w / 4, h - h * 3 / 5), PARK);
    fill_rect(canvas, PixelRect::new(x + w * 4 / 5, y, w - w * 4 / 5, h), WATER);

    let street = (h / 16).max(2);
    for fy in [35, 70] {
        fill_rect(canvas, PixelRect::new(x, y + h * fy / 100, w, street), STREET);
    }
    for fx in [30, 62] {
        fill_rect(canvas, PixelRect::new(x + w * fx / 100, y, street, h), STREET);
    }

    // Pin: round head above a tapering point, tip at the tile center
    let radius = (h / 8).max(3) as i64;
    let cx = (x + w / 2) as i64;
    let tip_y = (y + h / 2) as i64;
    let head_y = tip_y - radius * 2;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put(canvas, cx + dx, head_y + dy, PIN);
            }
        }
    }
    for step in 0..radius {
        let half = radius - step;
        for dx in -half..=half {
            put(canvas, cx + dx, head_y + radius / 2 + step, PIN);
        }
    }
    let dot = (radius / 3).max(1);
    for dy in -dot..=dot {
        for dx in -dot..=dot {
            if dx * dx + dy * dy <= dot * dot {
                put(canvas, cx + dx, head_y + dy, STREET);
            }
        }
    }

    // 1px frame
    fill_rect(canvas, PixelRect::new(x, y, w, 1), BORDER);
    fill_rect(canvas, PixelRect::new(x, y + h - 1, w, 1), BORDER);
    fill_rect(canvas, PixelRect::new(x, y, 1, h), BORDER);
    fill_rect(canvas, PixelRect::new(x + w - 1, y, 1, h), BORDER);
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 4]) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, image::Rgba(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region {
            x: 10.0,
            y: 10.0,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn test_tile_stays_inside_region() {
        let mut canvas = RgbaImage::new(220, 120);
        draw(&mut canvas, &region(), None);

        assert_eq!(canvas.get_pixel(5, 5).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(215, 115).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(10, 10).0, BORDER);
        assert_ne!(canvas.get_pixel(60, 40).0[3], 0);
    }

    #[test]
    fn test_missing_image_falls_back_to_tile() {
        let mut with_missing = RgbaImage::new(220, 120);
        draw(&mut with_missing, &region(), Some(Path::new("/nonexistent/map.png")));

        let mut builtin = RgbaImage::new(220, 120);
        draw(&mut builtin, &region(), None);

        assert_eq!(with_missing, builtin);
    }

    #[test]
    fn test_image_fills_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        RgbaImage::from_pixel(40, 20, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let mut canvas = RgbaImage::new(220, 120);
        draw(&mut canvas, &region(), Some(&path));
        let px = canvas.get_pixel(100, 50).0;
        for (got, want) in px.iter().zip([1u8, 2, 3, 255]) {
            assert!(got.abs_diff(want) <= 1, "{px:?}");
        }
        assert_eq!(canvas.get_pixel(5, 5).0, [0, 0, 0, 0]);
    }
}
