// SPDX-License-Identifier: MPL-2.0

//! Camera backend: device acquisition and frame delivery
//!
//! The preview pipeline is PipeWire-based (`pipewiresrc`), converted to RGBA
//! before it reaches the application so the rest of the code deals with a
//! single pixel format.

mod pipeline;
mod types;

pub use pipeline::MediaHandle;
pub use types::CameraFrame;
