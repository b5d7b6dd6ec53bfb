// SPDX-License-Identifier: GPL-3.0-only

//! Location value types

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Source of a location fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Satellite positioning
    Gps,
    /// Cell/Wi-Fi based positioning
    Network,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gps => write!(f, "gps"),
            ProviderKind::Network => write!(f, "network"),
        }
    }
}

/// A single reported location sample
///
/// Immutable once produced; a newer fix supersedes it rather than updating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub provider: ProviderKind,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, provider: ProviderKind) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: Utc::now(),
            provider,
        }
    }
}

/// Throttling hints passed to a provider when requesting updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    /// Minimum time between fixes
    pub min_interval: Duration,
    /// Minimum distance in meters between fixes
    pub min_distance_m: f32,
}

impl Default for UpdateRequest {
    fn default() -> Self {
        Self {
            min_interval: crate::constants::location::UPDATE_INTERVAL,
            min_distance_m: crate::constants::location::UPDATE_DISTANCE_M,
        }
    }
}

/// Newest fix per provider kind received over a live subscription
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveFixes {
    gps: Option<LocationFix>,
    network: Option<LocationFix>,
}

impl LiveFixes {
    pub fn record(&mut self, fix: LocationFix) {
        match fix.provider {
            ProviderKind::Gps => self.gps = Some(fix),
            ProviderKind::Network => self.network = Some(fix),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<LocationFix> {
        match kind {
            ProviderKind::Gps => self.gps,
            ProviderKind::Network => self.network,
        }
    }

    /// GPS fix if one arrived, else the network one
    pub fn preferred(&self) -> Option<LocationFix> {
        self.gps.or(self.network)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
