// SPDX-License-Identifier: GPL-3.0-only

//! The capture session: explicit owner of the device handle, the selected
//! filter and the recording controller
//!
//! All user-facing operations go through the session rather than ambient
//! globals. A session without a device (acquisition denied or no camera)
//! stays usable: every capture or record attempt surfaces
//! [`AppError::DeviceUnavailable`] instead of crashing.

use crate::backends::camera::{CameraFrame, MediaHandle};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::filters::FilterType;
use crate::pipelines::photo;
use crate::pipelines::video::{RecorderState, RecordingController};
use std::path::PathBuf;
use tracing::{error, info};

pub struct CaptureSession {
    device: Option<MediaHandle>,
    filter: FilterType,
    recorder: RecordingController,
    output_dir: PathBuf,
}

impl CaptureSession {
    /// Create a session over an already-acquired (or absent) device
    pub fn new(device: Option<MediaHandle>, filter: FilterType, output_dir: PathBuf) -> Self {
        Self {
            device,
            filter,
            recorder: RecordingController::new(),
            output_dir,
        }
    }

    /// Acquire the camera and build the session from configuration
    ///
    /// Acquisition failure is not fatal and not retried: the error is
    /// surfaced here and the session continues without a device.
    pub fn acquire(config: &Config) -> Self {
        let device = match MediaHandle::acquire() {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "Camera acquisition failed");
                eprintln!("{}", e);
                None
            }
        };
        Self::new(device, config.startup_filter, config.resolve_output_dir())
    }

    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    pub fn device(&self) -> Option<&MediaHandle> {
        self.device.as_ref()
    }

    /// The most recent preview frame
    pub fn current_frame(&self) -> Option<CameraFrame> {
        self.device.as_ref().and_then(MediaHandle::current_frame)
    }

    pub fn selected_filter(&self) -> FilterType {
        self.filter
    }

    pub fn select_filter(&mut self, filter: FilterType) {
        info!(filter = %filter, "Filter selected");
        self.filter = filter;
    }

    /// Select a filter by registry name
    ///
    /// Fails with [`AppError::UnknownFilter`] for names outside the fixed
    /// set; the selection is left unchanged in that case.
    pub fn select_filter_by_name(&mut self, name: &str) -> AppResult<()> {
        self.filter = FilterType::from_name(name)?;
        info!(filter = %self.filter, "Filter selected");
        Ok(())
    }

    pub fn cycle_filter_forward(&mut self) {
        self.filter = self.filter.next();
    }

    pub fn cycle_filter_backward(&mut self) {
        self.filter = self.filter.prev();
    }

    /// Capture a still through the selected filter and save `photo.png`
    ///
    /// The still uses exactly the descriptor driving the preview.
    pub async fn capture_photo(&self) -> AppResult<PathBuf> {
        let device = self.device.as_ref().ok_or_else(|| {
            AppError::DeviceUnavailable("no camera handle for photo capture".to_string())
        })?;

        let still = photo::capture_still(device, self.filter.descriptor())?;
        let data = photo::encode_png(still).await?;
        photo::save_photo(data, &self.output_dir).await
    }

    pub fn recorder_state(&self) -> RecorderState {
        self.recorder.state()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Start recording the raw device stream
    ///
    /// Filters are a preview and still-capture effect only; the recording
    /// pipeline deliberately bypasses the selected filter.
    pub fn start_recording(&mut self) -> AppResult<()> {
        if self.device.is_none() {
            return Err(AppError::DeviceUnavailable(
                "no camera handle for recording".to_string(),
            ));
        }
        self.recorder.start()
    }

    /// Finalize the active recording and save `recording.webm`
    pub async fn stop_recording(&mut self) -> AppResult<PathBuf> {
        self.recorder.stop(&self.output_dir).await
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}
