// SPDX-License-Identifier: MPL-2.0

//! GPSPic - photos stamped with where they were taken
//!
//! A capture runs the camera, then burns a panel with the place name, date,
//! coordinates, street address and a map tile into the bottom of the photo.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Capture controller (shutter flow, toggles, live location, gallery)
//! - [`backends`]: Camera, location and geocoding ports with in-process implementations
//! - [`overlay`]: Overlay content, layout, and rasterization
//! - [`pipelines`]: Capture, compositing and atomic JPEG persistence
//! - [`config`]: User configuration handling
//! - [`storage`]: Capture filenames and gallery thumbnail
//!
//! # Example
//!
//! ```ignore
//! let controller = CaptureController::new(config, camera, location, geocoder);
//! let outcome = controller.capture_photo().await?;
//! println!("{}", outcome.path.display());
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod overlay;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{CaptureController, CaptureOutcome, CapturePhase, Notice};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use overlay::{OverlayContent, OverlayRenderer};
