// SPDX-License-Identifier: GPL-3.0-only

//! Reverse geocoding
//!
//! [`GeocodingService`] is the port to whatever turns coordinates into
//! addresses. [`ReverseGeocoder`] wraps it with a degrade-gracefully contract:
//! any failure or an empty result set becomes an empty [`AddressRecord`].

pub mod fixed;

pub use fixed::FixedGeocoder;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Human-readable address for a position
///
/// Every field is optional; a record with no fields is the "unknown address"
/// value produced when geocoding fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub locality: Option<String>,
    pub admin_area: Option<String>,
    pub country_name: Option<String>,
    pub address_line: Option<String>,
}

impl AddressRecord {
    /// Whether no field carries any text
    pub fn is_empty(&self) -> bool {
        self.parts().next().is_none() && non_blank(&self.address_line).is_none()
    }

    /// `locality, admin_area, country_name`, skipping missing parts
    ///
    /// `None` when all three are missing.
    pub fn region_label(&self) -> Option<String> {
        let parts: Vec<&str> = self.parts().collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// The full single-line address, if known
    pub fn address_line(&self) -> Option<&str> {
        non_blank(&self.address_line)
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.locality, &self.admin_area, &self.country_name]
            .into_iter()
            .filter_map(non_blank)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A reverse geocoding backend
pub trait GeocodingService: Send + Sync {
    /// Look up to `max_results` addresses near a position
    ///
    /// May block on network I/O; the service's own timeout applies.
    fn from_location(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: usize,
    ) -> Result<Vec<AddressRecord>, String>;
}

/// Degrade-gracefully wrapper over a [`GeocodingService`]
#[derive(Clone)]
pub struct ReverseGeocoder {
    service: Arc<dyn GeocodingService>,
}

impl ReverseGeocoder {
    pub fn new(service: Arc<dyn GeocodingService>) -> Self {
        Self { service }
    }

    /// Resolve a position to its best address, blocking the calling thread
    ///
    /// Never fails: errors and empty results yield an empty record.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> AddressRecord {
        match self.service.from_location(latitude, longitude, 1) {
            Ok(results) => match results.into_iter().next() {
                Some(address) => {
                    debug!(?address, "Reverse geocoding resolved");
                    address
                }
                None => {
                    debug!(latitude, longitude, "Reverse geocoding returned no results");
                    AddressRecord::default()
                }
            },
            Err(e) => {
                warn!(error = %e, latitude, longitude, "Error getting location details");
                AddressRecord::default()
            }
        }
    }

    /// [`ReverseGeocoder::resolve`] on a blocking worker
    pub async fn resolve_async(&self, latitude: f64, longitude: f64) -> AddressRecord {
        let geocoder = self.clone();
        tokio::task::spawn_blocking(move || geocoder.resolve(latitude, longitude))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Geocoding task error");
                AddressRecord::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingService;

    impl GeocodingService for FailingService {
        fn from_location(&self, _: f64, _: f64, _: usize) -> Result<Vec<AddressRecord>, String> {
            Err("service not available".to_string())
        }
    }

    struct EmptyService;

    impl GeocodingService for EmptyService {
        fn from_location(&self, _: f64, _: f64, _: usize) -> Result<Vec<AddressRecord>, String> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_region_label_skips_missing_parts() {
        let address = AddressRecord {
            locality: Some("Mountain View".into()),
            admin_area: None,
            country_name: Some("USA".into()),
            address_line: None,
        };
        assert_eq!(address.region_label().as_deref(), Some("Mountain View, USA"));
        assert!(!address.is_empty());
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let address = AddressRecord {
            locality: Some("  ".into()),
            address_line: Some(String::new()),
            ..Default::default()
        };
        assert!(address.is_empty());
        assert_eq!(address.region_label(), None);
        assert_eq!(address.address_line(), None);
    }

    #[test]
    fn test_failures_degrade_to_empty_record() {
        let failing = ReverseGeocoder::new(Arc::new(FailingService));
        assert!(failing.resolve(1.0, 2.0).is_empty());

        let empty = ReverseGeocoder::new(Arc::new(EmptyService));
        assert!(empty.resolve(1.0, 2.0).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_async() {
        let address = AddressRecord {
            locality: Some("Mountain View".into()),
            ..Default::default()
        };
        let geocoder = ReverseGeocoder::new(Arc::new(FixedGeocoder::new(address.clone())));
        assert_eq!(geocoder.resolve_async(37.4219, -122.0841).await, address);
    }
}
