// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines
//!
//! - [`photo`]: capture, overlay compositing and atomic JPEG persistence

pub mod photo;
