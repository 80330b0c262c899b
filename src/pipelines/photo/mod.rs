// SPDX-License-Identifier: MPL-2.0

//! Still photo pipeline
//!
//! Capturing a still rasterizes the current preview frame through the
//! selected filter's effect descriptor, encodes it losslessly as PNG and
//! saves it as `photo.png`.

mod capture;
mod encoding;

pub use capture::{capture_still, render_still};
pub use encoding::{encode_png, save_photo};
