// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture and overlay pipeline
//!
//! Only capture and persistence failures are surfaced as errors. Missing
//! location fixes and geocoding failures degrade the overlay content instead
//! (see [`crate::app::Notice`]).

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera capture errors
    Capture(CaptureError),
    /// Overlay layout or rasterization errors
    Overlay(OverlayError),
    /// Errors writing the composited photo
    Persist(PersistError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Camera permission was not granted
    PermissionDenied,
    /// A capture is already in flight
    Busy,
    /// The camera pipeline reported an error
    Failed(String),
    /// The captured file could not be decoded
    DecodeFailed(String),
}

/// Overlay errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Target canvas has no area
    EmptyCanvas,
    /// Pixel buffer does not match its declared dimensions
    InvalidBuffer(String),
    /// Background task panicked or was cancelled
    TaskFailed(String),
}

/// Errors writing the composited photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// JPEG encoding failed
    EncodingFailed(String),
    /// Writing, flushing or replacing the destination failed
    WriteFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Overlay(e) => write!(f, "Overlay error: {}", e),
            AppError::Persist(e) => write!(f, "Save error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied => write!(f, "Camera permission denied"),
            CaptureError::Busy => write!(f, "A capture is already in progress"),
            CaptureError::Failed(msg) => write!(f, "Photo capture failed: {}", msg),
            CaptureError::DecodeFailed(msg) => write!(f, "Captured photo unreadable: {}", msg),
        }
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::EmptyCanvas => write!(f, "Target canvas is empty"),
            OverlayError::InvalidBuffer(msg) => write!(f, "Invalid pixel buffer: {}", msg),
            OverlayError::TaskFailed(msg) => write!(f, "Overlay task error: {}", msg),
        }
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::EncodingFailed(msg) => write!(f, "JPEG encoding failed: {}", msg),
            PersistError::WriteFailed(msg) => write!(f, "Failed to save overlayed image: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for OverlayError {}
impl std::error::Error for PersistError {}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<OverlayError> for AppError {
    fn from(err: OverlayError) -> Self {
        AppError::Overlay(err)
    }
}

impl From<PersistError> for AppError {
    fn from(err: PersistError) -> Self {
        AppError::Persist(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::WriteFailed(err.to_string())
    }
}

impl From<image::ImageError> for PersistError {
    fn from(err: image::ImageError) -> Self {
        PersistError::EncodingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err: AppError = CaptureError::Busy.into();
        assert_eq!(err.to_string(), "Capture error: A capture is already in progress");

        let err: AppError = PersistError::WriteFailed("disk full".into()).into();
        assert_eq!(
            err.to_string(),
            "Save error: Failed to save overlayed image: disk full"
        );
    }

    #[test]
    fn test_io_error_maps_to_write_failure() {
        let io = std::io::Error::other("boom");
        assert_eq!(
            PersistError::from(io),
            PersistError::WriteFailed("boom".to_string())
        );
    }
}
