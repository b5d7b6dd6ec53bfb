// SPDX-License-Identifier: GPL-3.0-only

//! Capture state machine and user-facing notices

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Phase of the capture currently in flight
///
/// ```text
/// Idle → Capturing → LocationLookup → Geocoding → Rendering → Compositing → Persisted
/// ```
///
/// Location and geocoding failures still move on to `Rendering` (with
/// placeholder texts). Every capture ends back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    Capturing,
    LocationLookup,
    Geocoding,
    Rendering,
    Compositing,
    Persisted,
}

impl CapturePhase {
    /// Whether a capture is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, CapturePhase::Idle)
    }
}

fn lock(phase: &Mutex<CapturePhase>) -> MutexGuard<'_, CapturePhase> {
    phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read the current phase
pub fn current_phase(phase: &Mutex<CapturePhase>) -> CapturePhase {
    *lock(phase)
}

/// Exclusive hold on the capture phase for one capture
///
/// Only one guard can exist at a time. Dropping it returns the phase to
/// `Idle`, whichever way the capture ended.
pub struct PhaseGuard {
    phase: Arc<Mutex<CapturePhase>>,
}

impl PhaseGuard {
    /// Move `Idle → Capturing`, or `None` if a capture is already running
    pub fn try_begin(phase: &Arc<Mutex<CapturePhase>>) -> Option<Self> {
        let mut current = lock(phase);
        if current.is_busy() {
            debug!(phase = ?*current, "Capture rejected, one is already in flight");
            return None;
        }
        *current = CapturePhase::Capturing;
        debug!("Capture phase: Capturing");

        Some(Self {
            phase: Arc::clone(phase),
        })
    }

    pub fn advance(&self, next: CapturePhase) {
        debug!(phase = ?next, "Capture phase");
        *lock(&self.phase) = next;
    }

    pub fn phase(&self) -> CapturePhase {
        current_phase(&self.phase)
    }
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        *lock(&self.phase) = CapturePhase::Idle;
    }
}

/// Which permission a notice refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    Camera,
    Location,
}

/// Transient message for the user (a toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied(PermissionKind),
    /// No fix was available; the overlay shows placeholders
    LocationUnavailable,
    /// The geocoder returned nothing usable
    GeocodingFailed,
    /// Rendering, compositing or saving the overlay failed; the plain photo stays
    OverlayFailed(String),
    PhotoSaved { path: PathBuf, overlay: bool },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PermissionDenied(PermissionKind::Camera) => {
                write!(f, "Camera permission is needed to take photos")
            }
            Notice::PermissionDenied(PermissionKind::Location) => {
                write!(f, "Location permission is needed for the GPS overlay")
            }
            Notice::LocationUnavailable => write!(f, "Location unavailable"),
            Notice::GeocodingFailed => write!(f, "Error getting location details"),
            Notice::OverlayFailed(_) => write!(f, "Failed to save overlayed image"),
            Notice::PhotoSaved {
                path,
                overlay: true,
            } => write!(f, "GPS photo saved: {}", path.display()),
            Notice::PhotoSaved {
                path,
                overlay: false,
            } => write!(f, "Photo saved: {}", path.display()),
        }
    }
}

/// Result of a capture that produced a file
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// The saved photo
    pub path: PathBuf,
    /// Whether the file now carries the overlay
    pub overlay_applied: bool,
    /// Notices raised along the way, in order
    pub notices: Vec<Notice>,
}
