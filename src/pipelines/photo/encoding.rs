// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding and atomic persistence
//!
//! The composited photo replaces the camera's file in place. Bytes go to a
//! temporary file in the same directory, which is flushed, synced and then
//! renamed over the destination, so readers see either the old file or the
//! complete new one.

use crate::constants::DEFAULT_JPEG_QUALITY;
use crate::errors::PersistError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Prefix of in-progress temporary files
const TEMP_PREFIX: &str = ".gpspic-";

/// Filesystem port for finished photos
pub trait PhotoStore: Send + Sync {
    /// Replace `destination` with the bytes `write` produces
    ///
    /// On any failure `destination` must keep its previous contents.
    fn replace(
        &self,
        destination: &Path,
        write: &mut dyn FnMut(&mut dyn Write) -> Result<(), PersistError>,
    ) -> Result<(), PersistError>;
}

/// Local disk store using [`write_atomically`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicFileStore;

impl PhotoStore for AtomicFileStore {
    fn replace(
        &self,
        destination: &Path,
        write: &mut dyn FnMut(&mut dyn Write) -> Result<(), PersistError>,
    ) -> Result<(), PersistError> {
        write_atomically(destination, |writer| write(writer))
    }
}

/// Photo encoder
#[derive(Debug, Clone, Copy)]
pub struct PhotoEncoder {
    quality: u8,
}

impl PhotoEncoder {
    /// Create an encoder with the given JPEG quality (clamped to 1-100)
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode as JPEG into `writer`; alpha is dropped
    pub fn encode_jpeg(
        &self,
        image: &RgbaImage,
        writer: &mut dyn Write,
    ) -> Result<(), PersistError> {
        let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
        let encoder = JpegEncoder::new_with_quality(writer, self.quality);
        rgb.write_with_encoder(encoder)?;
        Ok(())
    }

    /// Encode and atomically replace `destination`
    pub fn save_blocking(&self, image: &RgbaImage, destination: &Path) -> Result<(), PersistError> {
        self.save_blocking_in(&AtomicFileStore, image, destination)
    }

    /// Encode and replace `destination` through `store`
    pub fn save_blocking_in(
        &self,
        store: &dyn PhotoStore,
        image: &RgbaImage,
        destination: &Path,
    ) -> Result<(), PersistError> {
        store.replace(destination, &mut |writer: &mut dyn Write| {
            self.encode_jpeg(image, writer)
        })
    }

    /// Encode and atomically replace `destination` on the blocking pool
    pub async fn save(
        &self,
        image: RgbaImage,
        destination: PathBuf,
    ) -> Result<PathBuf, PersistError> {
        self.save_in(Arc::new(AtomicFileStore), image, destination)
            .await
    }

    /// Encode and replace `destination` through `store` on the blocking pool
    pub async fn save_in(
        &self,
        store: Arc<dyn PhotoStore>,
        image: RgbaImage,
        destination: PathBuf,
    ) -> Result<PathBuf, PersistError> {
        info!(
            path = %destination.display(),
            width = image.width(),
            height = image.height(),
            quality = self.quality,
            "Saving photo"
        );

        let encoder = *self;
        tokio::task::spawn_blocking(move || {
            encoder.save_blocking_in(store.as_ref(), &image, &destination)?;
            info!(path = %destination.display(), "Photo saved successfully");
            Ok::<_, PersistError>(destination)
        })
        .await
        .map_err(|e| PersistError::WriteFailed(format!("Save task error: {}", e)))?
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

/// Run `write` against a temporary file next to `destination`, then rename it into place
///
/// If `write` or any later step fails, the temporary file is removed and
/// `destination` keeps its previous contents.
pub fn write_atomically<F>(destination: &Path, write: F) -> Result<(), PersistError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), PersistError>,
{
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    let result = (|| {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
        drop(writer);
        temp.as_file().sync_all()?;
        Ok::<_, PersistError>(())
    })();

    if let Err(e) = result {
        warn!(path = %destination.display(), error = %e, "Write failed, destination left untouched");
        return Err(e);
    }

    temp.persist(destination)
        .map_err(|e| PersistError::WriteFailed(e.error.to_string()))?;
    debug!(path = %destination.display(), "Replaced atomically");
    Ok(())
}
