// SPDX-License-Identifier: GPL-3.0-only

//! Controller operations, grouped by functional domain

pub mod camera;
pub mod capture;
pub mod gallery;
pub mod location;

#[cfg(test)]
pub(crate) mod test_support;
