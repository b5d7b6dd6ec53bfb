// SPDX-License-Identifier: GPL-3.0-only

//! Ports to platform services
//!
//! - [`camera`]: still capture to a file
//! - [`location`]: GPS/network position providers
//! - [`geocoding`]: coordinates to address lookup

pub mod camera;
pub mod geocoding;
pub mod location;
