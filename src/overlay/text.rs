// SPDX-License-Identifier: GPL-3.0-only

//! Text measurement and rasterization for the overlay
//!
//! Uses a TrueType font through `rusttype`. When no font can be loaded the
//! overlay is still laid out with estimated metrics, but text is not drawn.

use super::Color;
use super::layout::{LineMetrics, TextRegion};
use crate::constants::FONT_SEARCH_PATHS;
use crate::constants::overlay::FALLBACK_ADVANCE_RATIO;
use image::{Pixel, Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A loaded overlay font, cheap to clone
#[derive(Clone)]
pub struct OverlayFont {
    font: Arc<Font<'static>>,
    path: PathBuf,
}

impl std::fmt::Debug for OverlayFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayFont").field("path", &self.path).finish()
    }
}

impl OverlayFont {
    /// Load a font file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Cannot read font {}: {}", path.display(), e))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| format!("Not a usable TrueType font: {}", path.display()))?;

        Ok(Self {
            font: Arc::new(font),
            path: path.to_path_buf(),
        })
    }

    /// Load `preferred` if given, otherwise the first system font that parses
    pub fn discover(preferred: Option<&Path>) -> Option<Self> {
        if let Some(path) = preferred {
            match Self::from_file(path) {
                Ok(font) => {
                    info!(path = %path.display(), "Loaded overlay font");
                    return Some(font);
                }
                Err(e) => warn!(error = %e, "Configured font unusable, searching system fonts"),
            }
        }

        for candidate in FONT_SEARCH_PATHS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(font) => {
                    info!(path = %path.display(), "Loaded overlay font");
                    return Some(font);
                }
                Err(e) => debug!(error = %e, "Skipping font candidate"),
            }
        }

        warn!("No overlay font found, overlay text will not be drawn");
        None
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extent of `text` at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> LineMetrics {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let height = v_metrics.ascent - v_metrics.descent + v_metrics.line_gap;

        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .fold(0.0_f32, f32::max);

        LineMetrics { width, height }
    }

    /// Draw `text` into `line`'s region, clipped at its right edge
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, line: &TextRegion, color: Color) {
        let TextRegion { region, font_size } = *line;
        let (x, y, max_width, size) = (region.x, region.y, region.width, font_size);

        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let right_edge = x + max_width;

        for glyph in self.font.layout(text, scale, point(x, y + v_metrics.ascent)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };

            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as f32 >= right_edge {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }

                let alpha = (coverage * color[3] as f32).round() as u8;
                if alpha == 0 {
                    return;
                }
                canvas
                    .get_pixel_mut(px, py)
                    .blend(&Rgba([color[0], color[1], color[2], alpha]));
            });
        }
    }
}

/// Metrics estimate used when no font is available
pub fn estimate_metrics(text: &str, size: f32) -> LineMetrics {
    LineMetrics {
        width: text.chars().count() as f32 * size * FALLBACK_ADVANCE_RATIO,
        height: size * 1.2,
    }
}
