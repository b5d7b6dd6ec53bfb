// SPDX-License-Identifier: GPL-3.0-only

//! Live location handlers
//!
//! The subscription is held by the controller and must be released with
//! [`CaptureController::stop_location_updates`] (or [`CaptureController::shutdown`])
//! when the capture screen goes away.

use crate::app::CaptureController;
use crate::backends::camera::PermissionState;
use crate::backends::location::LocationFix;
use std::sync::Arc;
use tracing::{debug, info};

impl CaptureController {
    // =========================================================================
    // Location Handlers
    // =========================================================================

    /// Start receiving live fixes; no-op when already running
    pub fn start_location_updates(&mut self) {
        if self.subscription.as_ref().is_some_and(|s| s.is_active()) {
            debug!("Location updates already running");
            return;
        }

        let live_fixes = Arc::clone(&self.live_fixes);
        let subscription = self.location.subscribe(move |fix| {
            if let Ok(mut fixes) = live_fixes.lock() {
                fixes.record(fix);
            }
        });

        if subscription.is_active() {
            info!("Location updates started");
            self.subscription = Some(subscription);
        } else {
            debug!("No location updates available");
        }
    }

    /// Cancel the live subscription, release the providers and forget live fixes
    pub fn stop_location_updates(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        if let Ok(mut fixes) = self.live_fixes.lock() {
            fixes.clear();
        }
    }

    pub fn location_updates_active(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_active())
    }

    /// Latest fix delivered by the live subscription, GPS before network
    pub fn live_fix(&self) -> Option<LocationFix> {
        self.live_fixes.lock().ok().and_then(|fixes| fixes.preferred())
    }

    /// Best fix for a capture
    ///
    /// GPS before network; within each, a live fix before the last known one.
    pub fn current_fix(&self) -> Option<LocationFix> {
        let live = self
            .live_fixes
            .lock()
            .map(|fixes| *fixes)
            .unwrap_or_default();
        self.location.best_fix(&live)
    }

    /// Record a location permission change from the platform
    ///
    /// Revoking stops updates and forgets the live fix.
    pub fn set_location_permission(&mut self, permission: PermissionState) {
        info!(?permission, "Location permission changed");
        self.location.set_permission(permission);
        self.config.location_permission = permission;

        if !permission.is_granted() {
            self.stop_location_updates();
        }
        self.persist_config();
    }

    /// Record a camera permission change from the platform
    pub fn set_camera_permission(&mut self, permission: PermissionState) {
        info!(?permission, "Camera permission changed");
        self.config.camera_permission = permission;
        self.persist_config();
    }

    /// Release everything tied to the capture screen
    pub fn shutdown(&mut self) {
        self.stop_location_updates();
        info!("Capture controller shut down");
    }
}
