// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for capture files and the gallery thumbnail

use crate::constants::{
    FILENAME_TIMESTAMP_FORMAT, GPS_PHOTO_SUFFIX, PLAIN_PHOTO_EXTENSION, file_formats, thumbnail,
};
use chrono::{DateTime, TimeZone};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Filename for a capture taken at `now`
///
/// Overlay captures end in `-GPSPic.jpg`, plain ones in `.jpg`.
pub fn capture_file_name<Tz>(now: &DateTime<Tz>, with_overlay: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let timestamp = now.format(FILENAME_TIMESTAMP_FORMAT);
    if with_overlay {
        format!("{}{}", timestamp, GPS_PHOTO_SUFFIX)
    } else {
        format!("{}.{}", timestamp, PLAIN_PHOTO_EXTENSION)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Newest capture in `dir`
///
/// Overlay captures (`-GPSPic.jpg`) win over other images; among each group
/// the most recently modified file is chosen.
pub fn latest_capture(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut best_overlay: Option<(SystemTime, PathBuf)> = None;
    let mut best_other: Option<(SystemTime, PathBuf)> = None;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !file_formats::is_image_extension(&extension) {
            continue;
        }

        let Some(mtime) = modified(&path) else {
            continue;
        };
        let slot = if name.ends_with(GPS_PHOTO_SUFFIX) {
            &mut best_overlay
        } else {
            &mut best_other
        };
        if slot.as_ref().is_none_or(|(best, _)| mtime > *best) {
            *slot = Some((mtime, path));
        }
    }

    best_overlay.or(best_other).map(|(_, path)| path)
}

/// Square crop of `image` with everything outside the inscribed circle transparent
pub fn circular_thumbnail(image: &DynamicImage, size: u32) -> RgbaImage {
    let mut thumb = image.resize_to_fill(size, size, FilterType::Triangle).to_rgba8();
    let radius = size as f32 / 2.0;

    for (x, y, pixel) in thumb.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            pixel.0[3] = 0;
        }
    }
    thumb
}

/// Gallery button thumbnail of the latest capture
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub path: PathBuf,
    pub image: RgbaImage,
}

/// Load the latest capture as a circular thumbnail
///
/// Scanning and decoding run on the blocking pool. Returns `None` when the
/// directory has no readable image.
pub async fn load_latest_thumbnail(photos_dir: PathBuf) -> Option<Thumbnail> {
    tokio::task::spawn_blocking(move || {
        let path = latest_capture(&photos_dir)?;
        debug!(path = %path.display(), "Loading latest thumbnail");

        let image = image::open(&path).ok()?;
        Some(Thumbnail {
            image: circular_thumbnail(&image, thumbnail::SIZE_PX),
            path,
        })
    })
    .await
    .ok()?
}
