// SPDX-License-Identifier: MPL-2.0

//! Photo pipeline
//!
//! ```text
//! Camera port → capture to disk → decode → composite overlay → atomic rewrite
//! ```
//!
//! # Stages
//!
//! 1. **Capture**: the camera writes its JPEG; nothing else starts until it has
//! 2. **Composite**: grid guides and the rendered overlay are drawn onto a copy
//! 3. **Persist**: the result is encoded and renamed over the camera's file
//!
//! Stages 1 and 3 run on the blocking pool so the caller's context stays free.

pub mod capture;
pub mod compositor;
pub mod encoding;

pub use capture::PhotoCapture;
pub use compositor::PhotoCompositor;
pub use encoding::{AtomicFileStore, PhotoEncoder, PhotoStore, write_atomically};
