// SPDX-License-Identifier: GPL-3.0-only

//! Device location
//!
//! [`LocationProvider`] is the port a platform positioning service implements
//! (one instance per provider, GPS or network). [`LocationSource`] applies the
//! selection policy on top: GPS first, network only when GPS has nothing.
//!
//! Live updates are delivered through a [`Subscription`]. Dropping or
//! cancelling it unregisters from every provider and stops the forwarding task.

pub mod manual;
pub mod types;

pub use manual::ManualProvider;
pub use types::{LiveFixes, LocationFix, ProviderKind, UpdateRequest};

use crate::backends::camera::PermissionState;
use futures::StreamExt;
use futures::channel::mpsc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A platform location provider
pub trait LocationProvider: Send + Sync {
    /// Which kind of provider this is
    fn kind(&self) -> ProviderKind;

    /// Whether the provider is switched on
    fn is_enabled(&self) -> bool;

    /// Most recent fix this provider has ever reported
    fn last_known(&self) -> Option<LocationFix>;

    /// Start sending fixes to `sink` until [`LocationProvider::remove_updates`]
    fn request_updates(&self, request: UpdateRequest, sink: mpsc::UnboundedSender<LocationFix>);

    /// Stop sending fixes and release every registered sink
    fn remove_updates(&self);
}

/// Location selection policy over a set of providers
pub struct LocationSource {
    providers: Vec<Arc<dyn LocationProvider>>,
    permission: PermissionState,
    request: UpdateRequest,
}

impl LocationSource {
    pub fn new(providers: Vec<Arc<dyn LocationProvider>>, permission: PermissionState) -> Self {
        Self {
            providers,
            permission,
            request: UpdateRequest::default(),
        }
    }

    /// Override the update throttling sent to providers
    pub fn with_update_request(mut self, request: UpdateRequest) -> Self {
        self.request = request;
        self
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn set_permission(&mut self, permission: PermissionState) {
        self.permission = permission;
    }

    /// Best-effort last known position
    ///
    /// Returns `None` without permission, when every provider is disabled, or
    /// when no enabled provider has ever produced a fix.
    pub fn last_fix(&self) -> Option<LocationFix> {
        self.best_fix(&LiveFixes::default())
    }

    /// Best position combining `live` fixes with the providers' last known ones
    ///
    /// GPS wins over network whatever the source. Within a kind, a live fix
    /// beats the last known one. Fixes from a kind with no enabled provider are
    /// ignored.
    pub fn best_fix(&self, live: &LiveFixes) -> Option<LocationFix> {
        if !self.permission.is_granted() {
            debug!("Location permission not granted, no fix");
            return None;
        }

        [ProviderKind::Gps, ProviderKind::Network]
            .into_iter()
            .filter(|&kind| self.has_enabled(kind))
            .find_map(|kind| live.get(kind).or_else(|| self.last_fix_from(kind)))
    }

    fn has_enabled(&self, kind: ProviderKind) -> bool {
        self.providers
            .iter()
            .any(|p| p.kind() == kind && p.is_enabled())
    }

    fn last_fix_from(&self, kind: ProviderKind) -> Option<LocationFix> {
        self.providers
            .iter()
            .filter(|p| p.kind() == kind && p.is_enabled())
            .find_map(|p| p.last_known())
    }

    /// Register for live updates from every enabled provider
    ///
    /// `on_fix` runs on a spawned task for each fix, in arrival order. Must be
    /// called from within a tokio runtime. Without permission or with no
    /// enabled provider the returned subscription is inactive.
    pub fn subscribe<F>(&self, mut on_fix: F) -> Subscription
    where
        F: FnMut(LocationFix) + Send + 'static,
    {
        if !self.permission.is_granted() {
            debug!("Location permission not granted, skipping updates");
            return Subscription::inactive();
        }

        let enabled: Vec<Arc<dyn LocationProvider>> = self
            .providers
            .iter()
            .filter(|p| p.is_enabled())
            .cloned()
            .collect();

        if enabled.is_empty() {
            debug!("No enabled location provider");
            return Subscription::inactive();
        }

        let (sender, mut receiver) = mpsc::unbounded();
        for provider in &enabled {
            info!(provider = %provider.kind(), "Requesting location updates");
            provider.request_updates(self.request, sender.clone());
        }
        // Providers hold the only senders; the stream ends once they all let go
        drop(sender);

        let task = tokio::spawn(async move {
            while let Some(fix) = receiver.next().await {
                debug!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    provider = %fix.provider,
                    "Location changed"
                );
                on_fix(fix);
            }
        });

        Subscription {
            task: Some(task),
            providers: enabled,
        }
    }
}

/// Handle to a live location update registration
#[must_use = "dropping a subscription stops location updates"]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
    providers: Vec<Arc<dyn LocationProvider>>,
}

impl Subscription {
    /// A subscription that never delivers anything
    pub fn inactive() -> Self {
        Self {
            task: None,
            providers: Vec::new(),
        }
    }

    /// Whether updates are still being forwarded
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Unregister from all providers and stop the forwarding task
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            info!("Stopping location updates");
            for provider in self.providers.drain(..) {
                provider.remove_updates();
            }
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
