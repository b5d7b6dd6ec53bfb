// SPDX-License-Identifier: GPL-3.0-only

//! Location overlay
//!
//! The overlay is a fixed five-region panel stacked top to bottom:
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │ Mountain View, CA, USA           │  header
//! │ Monday, October 19, 2026 3:04 PM │  date/time
//! │ Lat: 37.4219, Long: -122.0841    │  coordinates
//! │ 1600 Amphitheatre Pkwy           │  full address
//! │ ┌──────────────────────────────┐ │
//! │ │            map               │ │  map placeholder
//! │ └──────────────────────────────┘ │
//! └──────────────────────────────────┘
//! ```
//!
//! [`OverlayContent`] is the text/view-model, [`layout`] holds the sizing
//! math, and [`OverlayRenderer`] rasterizes a content value into an RGBA
//! buffer that fits the photo.

pub mod grid;
pub mod layout;
pub mod map;
pub mod renderer;
pub mod text;

pub use layout::{OverlaySize, fit_scale};
pub use renderer::{OverlayRenderer, RenderedOverlay};
pub use text::OverlayFont;

use crate::backends::geocoding::AddressRecord;
use crate::backends::location::LocationFix;
use crate::constants::text as templates;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What to draw in the map region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapPlaceholder {
    /// Procedurally drawn street tile with a pin
    #[default]
    Builtin,
    /// Image file scaled to fill the region
    Image(PathBuf),
}

/// Texts and map reference for one overlay
///
/// Built once per capture and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayContent {
    pub header_text: String,
    pub date_time_text: String,
    pub coordinates_text: String,
    pub address_text: String,
    pub map_placeholder: MapPlaceholder,
}

impl OverlayContent {
    /// Assemble overlay texts from a fix and its address
    ///
    /// With no fix, or an address without locality/region/country, the header
    /// reads "Location Unavailable"; the other lines fall back to their own
    /// "unavailable" texts independently.
    pub fn assemble<Tz>(
        fix: Option<&LocationFix>,
        address: &AddressRecord,
        captured_at: &DateTime<Tz>,
        map_placeholder: MapPlaceholder,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let header_text = fix
            .and_then(|_| address.region_label())
            .unwrap_or_else(|| templates::LOCATION_UNAVAILABLE.to_string());

        let coordinates_text = fix
            .map(|f| format_coordinates(f.latitude, f.longitude))
            .unwrap_or_else(|| templates::COORDINATES_UNAVAILABLE.to_string());

        let address_text = fix
            .and_then(|_| address.address_line())
            .unwrap_or(templates::ADDRESS_UNAVAILABLE)
            .to_string();

        Self {
            header_text,
            date_time_text: captured_at.format(templates::DATE_TIME_FORMAT).to_string(),
            coordinates_text,
            address_text,
            map_placeholder,
        }
    }

    /// The four text lines in drawing order
    pub fn lines(&self) -> [&str; 4] {
        [
            self.header_text.as_str(),
            self.date_time_text.as_str(),
            self.coordinates_text.as_str(),
            self.address_text.as_str(),
        ]
    }
}

/// `Lat: <lat>, Long: <lon>` with the shortest exact decimal form
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("Lat: {}, Long: {}", latitude, longitude)
}

/// RGBA color as stored in the config
pub type Color = [u8; 4];

/// Visual parameters of the overlay at natural size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Header text size in pixels
    pub header_size: f32,
    /// Size of the date, coordinate and address lines
    pub body_size: f32,
    /// Inner padding around the panel contents
    pub padding: f32,
    /// Vertical gap between regions
    pub spacing: f32,
    /// Height of the map region
    pub map_height: f32,
    /// Panel corner radius
    pub corner_radius: f32,
    pub background: Color,
    pub header_color: Color,
    pub body_color: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            header_size: 44.0,
            body_size: 32.0,
            padding: 24.0,
            spacing: 8.0,
            map_height: 180.0,
            corner_radius: 16.0,
            background: [0, 0, 0, 150],
            header_color: [255, 255, 255, 255],
            body_color: [225, 225, 225, 255],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::location::ProviderKind;
    use chrono::Local;

    fn captured_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 15, 4, 0).unwrap()
    }

    #[test]
    fn test_unavailable_without_fix() {
        let content = OverlayContent::assemble(
            None,
            &AddressRecord::default(),
            &captured_at(),
            MapPlaceholder::Builtin,
        );
        assert_eq!(content.header_text, "Location Unavailable");
        assert_eq!(content.coordinates_text, "Coordinates unavailable");
        assert_eq!(content.address_text, "Address unavailable");
        assert_eq!(content.date_time_text, "Monday, October 19, 2026 3:04 PM");
    }

    #[test]
    fn test_full_address() {
        let fix = LocationFix::new(37.4219, -122.0841, ProviderKind::Gps);
        let address = AddressRecord {
            locality: Some("Mountain View".into()),
            admin_area: Some("CA".into()),
            country_name: Some("USA".into()),
            address_line: Some("1600 Amphitheatre Pkwy".into()),
        };
        let content =
            OverlayContent::assemble(Some(&fix), &address, &captured_at(), MapPlaceholder::Builtin);
        assert_eq!(content.header_text, "Mountain View, CA, USA");
        assert_eq!(content.address_text, "1600 Amphitheatre Pkwy");
        assert_eq!(content.coordinates_text, "Lat: 37.4219, Long: -122.0841");
    }

    #[test]
    fn test_fix_without_address_keeps_coordinates() {
        let fix = LocationFix::new(48.8584, 2.2945, ProviderKind::Network);
        let content = OverlayContent::assemble(
            Some(&fix),
            &AddressRecord::default(),
            &captured_at(),
            MapPlaceholder::Builtin,
        );
        assert_eq!(content.header_text, "Location Unavailable");
        assert_eq!(content.coordinates_text, "Lat: 48.8584, Long: 2.2945");
        assert_eq!(content.address_text, "Address unavailable");
    }
}
