// SPDX-License-Identifier: MPL-2.0

//! Still capture from the live preview frame
//!
//! The still capturer and the preview consume the same effect descriptor,
//! so a captured photo always matches what the preview showed.

use crate::backends::camera::{CameraFrame, MediaHandle};
use crate::errors::{AppError, AppResult};
use crate::filters::EffectDescriptor;
use image::RgbaImage;
use tracing::{debug, info};

/// Capture a still from the device's current frame with the given effect
///
/// Fails with [`AppError::NoActiveFrame`] when the device has not delivered
/// a frame with known dimensions yet.
pub fn capture_still(handle: &MediaHandle, effect: &EffectDescriptor) -> AppResult<RgbaImage> {
    info!("Capturing still from live frame");
    let frame = handle.current_frame().ok_or(AppError::NoActiveFrame)?;
    render_still(&frame, effect)
}

/// Rasterize one frame through an effect descriptor
///
/// Allocates a raster of the frame's dimensions, draws the frame into it
/// (dropping any row padding) and applies the effect in place.
pub fn render_still(frame: &CameraFrame, effect: &EffectDescriptor) -> AppResult<RgbaImage> {
    if !frame.has_dimensions() {
        return Err(AppError::NoActiveFrame);
    }

    let width = frame.width;
    let height = frame.height;
    let row_bytes = (width * 4) as usize;
    let stride = frame.stride as usize;
    let data = frame.data_slice();

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        let end = start + row_bytes;
        if end > data.len() {
            return Err(AppError::Pipeline(format!(
                "Frame buffer too short: {} bytes for {}x{} stride {}",
                data.len(),
                width,
                height,
                stride
            )));
        }
        pixels.extend_from_slice(&data[start..end]);
    }

    effect.apply_rgba(&mut pixels, width, height);

    debug!(width, height, "Still rendered");

    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| AppError::Pipeline("Failed to build image from frame".to_string()))
}
