// SPDX-License-Identifier: GPL-3.0-only

//! Location provider fed by hand
//!
//! Fixes are pushed in explicitly (from CLI arguments, a config file, or a
//! test). Each push becomes the provider's last known fix and is forwarded to
//! every registered listener.

use super::LocationProvider;
use super::types::{LocationFix, ProviderKind, UpdateRequest};
use futures::channel::mpsc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

pub struct ManualProvider {
    kind: ProviderKind,
    enabled: AtomicBool,
    last: Mutex<Option<LocationFix>>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<LocationFix>>>,
}

impl ManualProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            enabled: AtomicBool::new(true),
            last: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Provider that already knows a position
    pub fn with_fix(fix: LocationFix) -> Self {
        let provider = Self::new(fix.provider);
        provider.push(fix);
        provider
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Report a new fix
    pub fn push(&self, fix: LocationFix) {
        match self.last.lock() {
            Ok(mut last) => *last = Some(fix),
            Err(_) => {
                warn!(provider = %self.kind, "Location state lock poisoned, dropping fix");
                return;
            }
        }

        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|sink| sink.unbounded_send(fix).is_ok());
        }
    }

    /// Number of registered update listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl LocationProvider for ManualProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn last_known(&self) -> Option<LocationFix> {
        self.last.lock().ok().and_then(|last| *last)
    }

    fn request_updates(&self, request: UpdateRequest, sink: mpsc::UnboundedSender<LocationFix>) {
        debug!(
            provider = %self.kind,
            interval_ms = request.min_interval.as_millis() as u64,
            distance_m = request.min_distance_m,
            "Listener registered"
        );
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(sink);
        }
    }

    fn remove_updates(&self) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.clear();
        }
    }
}
