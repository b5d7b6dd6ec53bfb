// SPDX-License-Identifier: GPL-3.0-only

//! Overlay rasterization
//!
//! The panel is laid out at natural size, the fit scale is computed against
//! the photo, and everything is drawn directly at the scaled size so no
//! resampling of the finished overlay is needed.

use super::layout::{OverlayLayout, OverlaySize, Region, fit_scale};
use super::text::{OverlayFont, estimate_metrics};
use super::{Color, MapPlaceholder, OverlayContent, OverlayStyle, map};
use crate::config::Config;
use crate::errors::OverlayError;
use image::{Pixel, Rgba, RgbaImage};
use tracing::debug;

/// Whole-pixel rectangle used by the drawing helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Snap a fractional region to pixels, keeping both edges rounded
    pub fn from_region(region: &Region) -> Self {
        let left = region.x.max(0.0).round() as u32;
        let top = region.y.max(0.0).round() as u32;
        let right = (region.x + region.width).max(0.0).round() as u32;
        let bottom = (region.y + region.height).max(0.0).round() as u32;
        Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fill `rect` with `color`, clipped to the canvas
///
/// Opaque colors replace pixels; translucent ones are alpha-blended.
pub fn fill_rect(canvas: &mut RgbaImage, rect: PixelRect, color: Color) {
    let x_end = rect.x.saturating_add(rect.width).min(canvas.width());
    let y_end = rect.y.saturating_add(rect.height).min(canvas.height());
    let paint = Rgba(color);

    for y in rect.y..y_end {
        for x in rect.x..x_end {
            if color[3] == u8::MAX {
                canvas.put_pixel(x, y, paint);
            } else {
                canvas.get_pixel_mut(x, y).blend(&paint);
            }
        }
    }
}

/// Fill the whole canvas with a rounded rectangle, leaving the corners transparent
fn fill_rounded_background(canvas: &mut RgbaImage, radius: f32, color: Color) {
    let (width, height) = canvas.dimensions();
    let r = radius.max(0.0).min(width.min(height) as f32 / 2.0);
    let paint = Rgba(color);

    for y in 0..height {
        for x in 0..width {
            let cx = x as f32 + 0.5;
            let cy = y as f32 + 0.5;
            let dx = (r - cx).max(cx - (width as f32 - r)).max(0.0);
            let dy = (r - cy).max(cy - (height as f32 - r)).max(0.0);
            if dx * dx + dy * dy <= r * r {
                canvas.put_pixel(x, y, paint);
            }
        }
    }
}

/// A rasterized overlay sized to fit its photo
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    pub image: RgbaImage,
    /// Fractional size before snapping to whole pixels
    pub size: OverlaySize,
    /// Uniform scale applied to the natural layout (at most 1.0)
    pub scale: f32,
}

/// Draws [`OverlayContent`] into RGBA buffers
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    font: Option<OverlayFont>,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle, font: Option<OverlayFont>) -> Self {
        Self { style, font }
    }

    /// Renderer using the configured style and font
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.overlay_style.clone(),
            OverlayFont::discover(config.font_path.as_deref()),
        )
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Layout at natural size, before fitting
    pub fn natural_layout(&self, content: &OverlayContent) -> OverlayLayout {
        OverlayLayout::natural(&self.style, content.lines(), |text, size| {
            match &self.font {
                Some(font) => font.measure(text, size),
                None => estimate_metrics(text, size),
            }
        })
    }

    /// Rasterize `content` for a photo of `max_width` × `max_height` pixels
    ///
    /// The result is at most 90% of the photo width and 30% of its height,
    /// with the natural aspect ratio preserved.
    pub fn render(
        &self,
        content: &OverlayContent,
        max_width: f32,
        max_height: f32,
    ) -> Result<RenderedOverlay, OverlayError> {
        if !(max_width > 0.0 && max_height > 0.0) {
            return Err(OverlayError::EmptyCanvas);
        }

        let natural = self.natural_layout(content);
        let scale = fit_scale(natural.size, max_width, max_height);
        let layout = natural.scaled(scale);
        let (width, height) = layout.size.pixel_dims();
        if width == 0 || height == 0 {
            debug!(max_width, max_height, "Photo too small for an overlay pixel");
            return Err(OverlayError::EmptyCanvas);
        }

        debug!(
            natural_width = natural.size.width,
            natural_height = natural.size.height,
            scale,
            width,
            height,
            "Rendering overlay"
        );

        let mut canvas = RgbaImage::new(width, height);
        fill_rounded_background(&mut canvas, layout.corner_radius, self.style.background);

        if let Some(font) = &self.font {
            for (index, (text, line)) in content.lines().iter().zip(&layout.lines).enumerate() {
                let color = if index == 0 {
                    self.style.header_color
                } else {
                    self.style.body_color
                };
                font.draw(&mut canvas, text, line, color);
            }
        }

        let map_image = match &content.map_placeholder {
            MapPlaceholder::Builtin => None,
            MapPlaceholder::Image(path) => Some(path.as_path()),
        };
        map::draw(&mut canvas, &layout.map, map_image);

        Ok(RenderedOverlay {
            image: canvas,
            size: layout.size,
            scale,
        })
    }

    /// [`render`](Self::render) on the blocking thread pool
    pub async fn render_async(
        &self,
        content: OverlayContent,
        max_width: f32,
        max_height: f32,
    ) -> Result<RenderedOverlay, OverlayError> {
        let renderer = self.clone();
        tokio::task::spawn_blocking(move || renderer.render(&content, max_width, max_height))
            .await
            .map_err(|e| OverlayError::TaskFailed(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> OverlayContent {
        OverlayContent {
            header_text: "Mountain View, CA, USA".into(),
            date_time_text: "Monday, October 19, 2026 3:04 PM".into(),
            coordinates_text: "Lat: 37.4219, Long: -122.0841".into(),
            address_text: "1600 Amphitheatre Pkwy, Mountain View, CA 94043".into(),
            map_placeholder: MapPlaceholder::Builtin,
        }
    }

    fn renderer() -> OverlayRenderer {
        OverlayRenderer::new(OverlayStyle::default(), None)
    }

    fn font_renderer() -> OverlayRenderer {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/DejaVuSans.ttf");
        OverlayRenderer::new(OverlayStyle::default(), Some(OverlayFont::from_file(&path).unwrap()))
    }

    #[test]
    fn test_text_drawn_inside_line_regions() {
        let r = font_renderer();
        let rendered = r.render(&content(), 1080.0, 1920.0).unwrap();
        let layout = r.natural_layout(&content()).scaled(rendered.scale);
        let image = &rendered.image;
        let lit = |x: u32, y: u32| image.get_pixel(x, y).0[0] > 0;

        let header = PixelRect::from_region(&layout.lines[0].region);
        let header_pixels = (header.x..header.x + header.width)
            .flat_map(|x| (header.y..header.y + header.height).map(move |y| (x, y)))
            .filter(|&(x, y)| lit(x, y))
            .count();
        assert!(header_pixels > 100, "header has {header_pixels} text pixels");

        let text = layout.lines[0].region;
        let right_edge = (text.x + text.width).ceil() as u32;
        let text_rows = text.y.floor() as u32..layout.map.y.floor() as u32;
        for y in text_rows {
            for x in right_edge..image.width() {
                assert!(!lit(x, y), "text pixel past the column at ({x}, {y})");
            }
        }

        let blank = renderer().render(&content(), 1080.0, 1920.0).unwrap();
        assert_ne!(blank.image, rendered.image);
    }

    #[test]
    fn test_fits_photo_bounds() {
        for (w, h) in [(1080u32, 1920u32), (4000, 3000), (640, 480), (300, 2000)] {
            let rendered = renderer().render(&content(), w as f32, h as f32).unwrap();
            let (ow, oh) = rendered.image.dimensions();
            assert!(ow as f32 <= w as f32 * 0.9, "{ow}x{oh} for {w}x{h}");
            assert!(oh as f32 <= h as f32 * 0.3, "{ow}x{oh} for {w}x{h}");
            assert!(rendered.scale <= 1.0);
        }
    }

    #[test]
    fn test_large_photo_keeps_natural_size() {
        let r = renderer();
        let natural = r.natural_layout(&content()).size;
        let rendered = r.render(&content(), 8000.0, 6000.0).unwrap();
        assert_eq!(rendered.scale, 1.0);
        assert_eq!(rendered.size, natural);
    }

    #[test]
    fn test_empty_canvas_rejected() {
        assert_eq!(
            renderer().render(&content(), 0.0, 1000.0).unwrap_err(),
            OverlayError::EmptyCanvas
        );
        assert_eq!(
            renderer().render(&content(), 1000.0, -1.0).unwrap_err(),
            OverlayError::EmptyCanvas
        );
    }

    #[test]
    fn test_tiny_photo_gets_no_overlay() {
        assert_eq!(
            renderer().render(&content(), 1.0, 1.0).unwrap_err(),
            OverlayError::EmptyCanvas
        );

        let rendered = renderer().render(&content(), 12.0, 12.0).unwrap();
        let (w, h) = rendered.image.dimensions();
        assert!(w as f32 <= 12.0 * 0.9 && h as f32 <= 12.0 * 0.3, "{w}x{h}");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = renderer().render(&content(), 1080.0, 1920.0).unwrap();
        let b = renderer().render(&content(), 1080.0, 1920.0).unwrap();
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn test_corners_are_transparent() {
        let rendered = renderer().render(&content(), 4000.0, 3000.0).unwrap();
        assert_eq!(rendered.image.get_pixel(0, 0).0[3], 0);
        let (w, h) = rendered.image.dimensions();
        assert_eq!(rendered.image.get_pixel(w / 2, 2).0, [0, 0, 0, 150]);
        assert_eq!(rendered.image.get_pixel(w - 1, h - 1).0[3], 0);
    }

    #[test]
    fn test_pixel_rect_from_region() {
        let rect = PixelRect::from_region(&Region {
            x: 1.4,
            y: 2.6,
            width: 10.2,
            height: 4.0,
        });
        assert_eq!(rect, PixelRect::new(1, 3, 11, 4));
        assert!(PixelRect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = RgbaImage::new(4, 4);
        fill_rect(&mut canvas, PixelRect::new(2, 2, 10, 10), [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_render_async_matches_sync() {
        let r = renderer();
        let sync = r.render(&content(), 1080.0, 1920.0).unwrap();
        let async_result = r.render_async(content(), 1080.0, 1920.0).await.unwrap();
        assert_eq!(sync.image, async_result.image);
    }
}
