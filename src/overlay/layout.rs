// SPDX-License-Identifier: GPL-3.0-only

//! Overlay sizing and region layout
//!
//! The panel is laid out once at natural size, then scaled uniformly so it
//! fits the photo: first by the width cap (90% of the photo width), then, if
//! it is still too tall, by the height cap (30% of the photo height). The
//! overlay is never enlarged.

use super::OverlayStyle;
use crate::constants::overlay::{MAX_HEIGHT_FRACTION, MAX_WIDTH_FRACTION, MIN_NATURAL_WIDTH};

/// Width and height in pixels (fractional before rasterization)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySize {
    pub width: f32,
    pub height: f32,
}

impl OverlaySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }

    /// Whole-pixel buffer dimensions, rounded down
    ///
    /// Either side may be 0 when the overlay is smaller than one pixel.
    pub fn pixel_dims(&self) -> (u32, u32) {
        (self.width.floor() as u32, self.height.floor() as u32)
    }
}

/// Uniform scale factor that fits `natural` inside a `max_width` × `max_height` photo
///
/// The result is at most 1.0. The width cap is applied first; if the height
/// at that scale still exceeds the height cap, the height cap decides.
pub fn fit_scale(natural: OverlaySize, max_width: f32, max_height: f32) -> f32 {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return 1.0;
    }

    let width_limit = max_width * MAX_WIDTH_FRACTION;
    let height_limit = max_height * MAX_HEIGHT_FRACTION;

    let mut scale = 1.0_f32;
    if natural.width > width_limit {
        scale = width_limit / natural.width;
    }

    if natural.height * scale > height_limit {
        scale = scale.min(height_limit / natural.height);
    }

    scale
}

/// Axis-aligned rectangle inside the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    fn scaled(&self, scale: f32) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// Measured extent of one line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub width: f32,
    pub height: f32,
}

/// A text line and where it goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRegion {
    pub region: Region,
    pub font_size: f32,
}

/// Positions of all five regions
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub size: OverlaySize,
    /// Header, date/time, coordinates, address
    pub lines: [TextRegion; 4],
    pub map: Region,
    pub corner_radius: f32,
}

impl OverlayLayout {
    /// Lay out `lines` at natural size
    ///
    /// `measure` reports the extent of a string at a given text size.
    pub fn natural<F>(style: &OverlayStyle, lines: [&str; 4], measure: F) -> Self
    where
        F: Fn(&str, f32) -> LineMetrics,
    {
        let sizes = [
            style.header_size,
            style.body_size,
            style.body_size,
            style.body_size,
        ];

        let metrics: Vec<LineMetrics> = lines
            .iter()
            .zip(sizes)
            .map(|(&line, size)| measure(line, size))
            .collect();

        let content_width = metrics
            .iter()
            .map(|m| m.width)
            .fold(MIN_NATURAL_WIDTH - 2.0 * style.padding, f32::max);

        let mut y = style.padding;
        let mut text_regions = [TextRegion {
            region: Region {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            font_size: 0.0,
        }; 4];

        for (slot, (m, size)) in text_regions.iter_mut().zip(metrics.iter().zip(sizes)) {
            *slot = TextRegion {
                region: Region {
                    x: style.padding,
                    y,
                    width: content_width,
                    height: m.height,
                },
                font_size: size,
            };
            y += m.height + style.spacing;
        }

        let map = Region {
            x: style.padding,
            y,
            width: content_width,
            height: style.map_height,
        };
        y += style.map_height + style.padding;

        Self {
            size: OverlaySize::new(content_width + 2.0 * style.padding, y),
            lines: text_regions,
            map,
            corner_radius: style.corner_radius,
        }
    }

    /// The same layout with every coordinate and text size multiplied by `scale`
    pub fn scaled(&self, scale: f32) -> Self {
        let mut lines = self.lines;
        for line in &mut lines {
            line.region = line.region.scaled(scale);
            line.font_size *= scale;
        }

        Self {
            size: self.size.scaled(scale),
            lines,
            map: self.map.scaled(scale),
            corner_radius: self.corner_radius * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn fixed_measure(text: &str, size: f32) -> LineMetrics {
        LineMetrics {
            width: text.chars().count() as f32 * size * 0.5,
            height: size * 1.25,
        }
    }

    #[test]
    fn test_small_overlay_is_not_enlarged() {
        let scale = fit_scale(OverlaySize::new(300.0, 100.0), 4000.0, 3000.0);
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_width_constraint_applies_first() {
        // 0.9 * 1000 = 900 -> scale 0.5, height 100 stays under 0.3 * 2000
        let scale = fit_scale(OverlaySize::new(1800.0, 200.0), 1000.0, 2000.0);
        assert!((scale - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_height_constraint_wins_when_tighter() {
        // width scale 0.5 leaves height 400 > 0.3 * 1000 = 300 -> scale 0.375
        let scale = fit_scale(OverlaySize::new(1800.0, 800.0), 1000.0, 1000.0);
        assert!((scale - 0.375).abs() < EPSILON);
    }

    #[test]
    fn test_fit_bounds_and_aspect_hold_across_sizes() {
        let naturals = [
            (480.0, 420.0),
            (1200.0, 300.0),
            (300.0, 1200.0),
            (5000.0, 5000.0),
            (64.0, 32.0),
        ];
        let bounds = [(1080.0, 1920.0), (1920.0, 1080.0), (400.0, 300.0), (8000.0, 6000.0)];

        for (w, h) in naturals {
            for (max_w, max_h) in bounds {
                let natural = OverlaySize::new(w, h);
                let fitted = natural.scaled(fit_scale(natural, max_w, max_h));

                assert!(fitted.width <= max_w * 0.9 * (1.0 + 1e-5), "{w}x{h} in {max_w}x{max_h}");
                assert!(fitted.height <= max_h * 0.3 * (1.0 + 1e-5), "{w}x{h} in {max_w}x{max_h}");
                let ratio = (fitted.aspect_ratio() - natural.aspect_ratio()).abs();
                assert!(ratio <= natural.aspect_ratio() * 1e-5);
            }
        }
    }

    #[test]
    fn test_pixel_dims_round_down_without_clamping() {
        assert_eq!(OverlaySize::new(972.9, 371.2).pixel_dims(), (972, 371));
        assert_eq!(OverlaySize::new(0.9, 0.79).pixel_dims(), (0, 0));
    }

    #[test]
    fn test_natural_layout_stacks_regions() {
        let style = OverlayStyle::default();
        let layout = OverlayLayout::natural(
            &style,
            ["Header", "Date", "Coordinates", "Address"],
            fixed_measure,
        );

        let mut previous_bottom = 0.0;
        for line in &layout.lines {
            assert!(line.region.y >= previous_bottom);
            previous_bottom = line.region.y + line.region.height;
        }
        assert!(layout.map.y >= previous_bottom);
        assert_eq!(layout.map.height, style.map_height);
        assert_eq!(layout.size.width, crate::constants::overlay::MIN_NATURAL_WIDTH);
        assert!((layout.size.height - (layout.map.y + layout.map.height + style.padding)).abs() < EPSILON);
    }

    #[test]
    fn test_long_line_widens_panel() {
        let style = OverlayStyle::default();
        let long = "x".repeat(100);
        let layout = OverlayLayout::natural(&style, [&long, "", "", ""], fixed_measure);
        let expected = 100.0 * style.header_size * 0.5 + 2.0 * style.padding;
        assert!((layout.size.width - expected).abs() < EPSILON);
    }

    #[test]
    fn test_scaled_layout_is_uniform() {
        let style = OverlayStyle::default();
        let layout = OverlayLayout::natural(&style, ["a", "b", "c", "d"], fixed_measure);
        let half = layout.scaled(0.5);
        assert!((half.size.width - layout.size.width * 0.5).abs() < EPSILON);
        assert!((half.size.height - layout.size.height * 0.5).abs() < EPSILON);
        assert!((half.lines[0].font_size - style.header_size * 0.5).abs() < EPSILON);
        assert!((half.map.y - layout.map.y * 0.5).abs() < EPSILON);
    }
}
