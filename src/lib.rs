// SPDX-License-Identifier: GPL-3.0-only

//! Filter Camera - webcam preview, photo capture and clip recording
//!
//! This library provides the core functionality for the Filter Camera
//! application: live camera preview with visual filters, filtered still
//! capture and WebM clip recording.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: Camera device acquisition (GStreamer/PipeWire)
//! - [`filters`]: The fixed filter registry and effect descriptors
//! - [`pipelines`]: Photo and video capture pipelines
//! - [`session`]: The capture session owning device, filter and recorder
//! - [`config`]: User configuration handling
//! - [`terminal`]: Terminal-based live preview

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod pipelines;
pub mod session;
pub mod terminal;

// Re-export commonly used types
pub use backends::camera::{CameraFrame, MediaHandle};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use filters::{EffectDescriptor, FilterType};
pub use pipelines::video::RecorderState;
pub use session::CaptureSession;
