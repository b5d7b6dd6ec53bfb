// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Folder created under the user's picture directory
pub const DEFAULT_SAVE_FOLDER: &str = "GPSPic";

/// Timestamp pattern used for capture filenames (`2026-10-19-15-04-05-123`)
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// Suffix appended to captures that carry the location overlay
pub const GPS_PHOTO_SUFFIX: &str = "-GPSPic.jpg";

/// Extension used for plain captures
pub const PLAIN_PHOTO_EXTENSION: &str = "jpg";

/// JPEG quality used when re-encoding composited photos
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Overlay placement and sizing
pub mod overlay {
    /// Largest share of the photo width the overlay may occupy
    pub const MAX_WIDTH_FRACTION: f32 = 0.9;

    /// Largest share of the photo height the overlay may occupy
    pub const MAX_HEIGHT_FRACTION: f32 = 0.3;

    /// Gap between the overlay's bottom edge and the photo's bottom edge
    pub const BOTTOM_MARGIN_PX: i64 = 48;

    /// Narrowest natural overlay width, so short addresses still get a usable map strip
    pub const MIN_NATURAL_WIDTH: f32 = 480.0;

    /// Average glyph advance relative to the text size, used when no font is available
    pub const FALLBACK_ADVANCE_RATIO: f32 = 0.55;
}

/// Overlay text templates
pub mod text {
    /// Header shown when there is no usable address
    pub const LOCATION_UNAVAILABLE: &str = "Location Unavailable";

    /// Coordinates line shown without a fix
    pub const COORDINATES_UNAVAILABLE: &str = "Coordinates unavailable";

    /// Address line shown when geocoding produced nothing
    pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";

    /// chrono pattern for the capture date (`Monday, October 19, 2026 3:04 PM`)
    pub const DATE_TIME_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";
}

/// Location update request parameters
pub mod location {
    use super::Duration;

    /// Minimum time between provider updates
    pub const UPDATE_INTERVAL: Duration = Duration::from_secs(10);

    /// Minimum movement in meters between provider updates
    pub const UPDATE_DISTANCE_M: f32 = 10.0;
}

/// Gallery button thumbnail
pub mod thumbnail {
    /// Edge length of the circular gallery thumbnail
    pub const SIZE_PX: u32 = 96;
}

/// Fonts probed when the config does not name one
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/system/fonts/Roboto-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Supported file formats
pub mod file_formats {
    /// Image extensions the camera file source can load
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

    /// Check if an extension (lowercase, without dot) is a supported image
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext)
    }
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        assert!(file_formats::is_image_extension("jpg"));
        assert!(file_formats::is_image_extension("png"));
        assert!(!file_formats::is_image_extension("mp4"));
        assert!(!file_formats::is_image_extension("JPG"));
    }

    #[test]
    fn test_timestamp_format_renders_millis() {
        let ts = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_milli_opt(15, 4, 5, 7))
            .map(|dt| dt.format(FILENAME_TIMESTAMP_FORMAT).to_string());
        assert_eq!(ts.as_deref(), Some("2026-10-19-15-04-05-007"));
    }
}
