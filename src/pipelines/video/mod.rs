// SPDX-License-Identifier: MPL-2.0

//! Video recording pipeline
//!
//! Recording consumes the raw device stream: filters are a preview and
//! still-capture effect only and never touch the recorded clip.

mod chunks;
mod recorder;

pub use chunks::ChunkBuffer;
pub use recorder::{RecorderState, RecordingController, element_inventory};
