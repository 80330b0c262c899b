// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use std::sync::Arc;
use std::time::Instant;

/// One decoded RGBA frame from the live preview pipeline
///
/// Frame data is reference counted so cloning a frame is cheap; the preview,
/// the still capturer and tests can all hold the same pixels without copying.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Row stride in bytes (may exceed `width * 4` for aligned buffers)
    pub stride: u32,
    /// RGBA pixel data
    pub data: Arc<[u8]>,
    /// When the frame was pulled from the pipeline
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Raw pixel bytes
    pub fn data_slice(&self) -> &[u8] {
        &self.data
    }

    /// Whether the frame has usable, non-zero dimensions
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Sample the RGB value at a pixel coordinate, clamped to the frame
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        if !self.has_dimensions() {
            return (0, 0, 0);
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = (y * self.stride + x * 4) as usize;
        let data = self.data_slice();
        if idx + 2 < data.len() {
            (data[idx], data[idx + 1], data[idx + 2])
        } else {
            (0, 0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_at_clamps_coordinates() {
        let frame = CameraFrame {
            width: 2,
            height: 1,
            stride: 8,
            data: Arc::from(vec![10, 20, 30, 255, 40, 50, 60, 255]),
            captured_at: Instant::now(),
        };

        assert_eq!(frame.rgb_at(0, 0), (10, 20, 30));
        assert_eq!(frame.rgb_at(1, 0), (40, 50, 60));
        // out of range clamps to the last pixel
        assert_eq!(frame.rgb_at(9, 9), (40, 50, 60));
    }

    #[test]
    fn test_zero_dimensions_detected() {
        let frame = CameraFrame {
            width: 0,
            height: 0,
            stride: 0,
            data: Arc::from(Vec::new()),
            captured_at: Instant::now(),
        };
        assert!(!frame.has_dimensions());
        assert_eq!(frame.rgb_at(0, 0), (0, 0, 0));
    }
}
