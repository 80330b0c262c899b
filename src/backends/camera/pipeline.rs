// SPDX-License-Identifier: MPL-2.0

//! Live preview pipeline and the media handle that owns it

use super::types::CameraFrame;
use crate::constants::{pipeline, timing};
use crate::errors::{AppError, AppResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Shared slot holding the most recent decoded frame
type FrameSlot = Arc<RwLock<Option<CameraFrame>>>;

/// The live combined audio/video device handle
///
/// Acquired once at startup and held for the application's lifetime. The
/// handle owns the preview pipeline (`pipewiresrc ! videoconvert ! appsink`
/// in RGBA) and exposes the most recent frame to the preview surface and
/// the still capturer. The recording controller opens its own consumers of
/// the same live devices; multiple independent readers of a PipeWire stream
/// are safe.
pub struct MediaHandle {
    pipeline: gst::Pipeline,
    appsink: AppSink,
    latest: FrameSlot,
}

impl MediaHandle {
    /// Request camera access and start the preview pipeline
    ///
    /// Uses the platform default camera at its default resolution and
    /// framerate. Fails with [`AppError::DeviceUnavailable`] when access is
    /// denied or no device is present; there is no automatic retry.
    pub fn acquire() -> AppResult<Self> {
        info!("Acquiring camera device");

        gst::init().map_err(|e| {
            AppError::DeviceUnavailable(format!("Failed to initialize GStreamer: {}", e))
        })?;

        let source = gst::ElementFactory::make("pipewiresrc")
            .property("do-timestamp", true)
            .build()
            .map_err(|e| AppError::DeviceUnavailable(format!("Failed to create pipewiresrc: {}", e)))?;

        let videoconvert = gst::ElementFactory::make("videoconvert")
            .build()
            .map_err(|e| AppError::Pipeline(format!("Failed to create videoconvert: {}", e)))?;

        let appsink = gst::ElementFactory::make("appsink")
            .build()
            .map_err(|e| AppError::Pipeline(format!("Failed to create appsink: {}", e)))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| AppError::Pipeline("Failed to cast to AppSink".to_string()))?;

        // Single pixel format for the whole application
        let preview_caps = gst::Caps::builder("video/x-raw")
            .field("format", "RGBA")
            .build();
        appsink.set_caps(Some(&preview_caps));
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        let pipeline = gst::Pipeline::new();
        pipeline
            .add_many([&source, &videoconvert, appsink.upcast_ref::<gst::Element>()])
            .map_err(|e| AppError::Pipeline(format!("Failed to add elements: {}", e)))?;

        source
            .link(&videoconvert)
            .map_err(|_| AppError::Pipeline("Failed to link source to videoconvert".to_string()))?;
        videoconvert
            .link(appsink.upcast_ref::<gst::Element>())
            .map_err(|_| AppError::Pipeline("Failed to link videoconvert to appsink".to_string()))?;

        let latest: FrameSlot = Arc::new(RwLock::new(None));
        let slot = latest.clone();

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gst::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gst::FlowError::Error)?;
                    let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: Arc::from(map.as_slice()),
                        captured_at: Instant::now(),
                    };

                    if frame_num % 60 == 0 {
                        debug!(
                            frame = frame_num,
                            width = frame.width,
                            height = frame.height,
                            stride = frame.stride,
                            "Preview frame"
                        );
                    }

                    if let Ok(mut latest) = slot.write() {
                        *latest = Some(frame);
                    }

                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gst::State::Playing).map_err(|e| {
            AppError::DeviceUnavailable(format!("Failed to start preview pipeline: {}", e))
        })?;

        // Wait for the state change to complete
        let (result, state, pending) =
            pipeline.state(gst::ClockTime::from_seconds(timing::START_TIMEOUT_SECS));
        debug!(result = ?result, state = ?state, pending = ?pending, "Preview pipeline state");
        if result.is_err() {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(AppError::DeviceUnavailable(
                "Preview pipeline failed to start (permission denied or no device)".to_string(),
            ));
        }
        if state != gst::State::Playing {
            warn!("Preview pipeline is not in PLAYING state yet");
        }

        info!("Camera acquired");

        Ok(Self {
            pipeline,
            appsink,
            latest,
        })
    }

    /// The most recent frame delivered by the device, if any
    pub fn current_frame(&self) -> Option<CameraFrame> {
        self.latest.read().ok().and_then(|slot| slot.clone())
    }

    /// Block until the camera has warmed up and delivered a frame
    ///
    /// Auto-exposure needs a few frames to settle, so frames arriving before
    /// the warm-up period are discarded. Fails with
    /// [`AppError::NoActiveFrame`] if no frame arrives within the timeout.
    pub fn wait_for_frame(&self, warmup: Duration, timeout: Duration) -> AppResult<CameraFrame> {
        let start = Instant::now();
        let mut frame: Option<CameraFrame> = None;

        while start.elapsed() < timeout {
            if let Some(f) = self.current_frame() {
                let settled = start.elapsed() > warmup;
                frame = Some(f);
                if settled {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(16));
        }

        frame.ok_or(AppError::NoActiveFrame)
    }
}

impl std::fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHandle")
            .field("has_frame", &self.latest.read().map(|s| s.is_some()).unwrap_or(false))
            .finish()
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        info!("Releasing camera device");
        // Clear callbacks first to release the frame slot reference
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gst::State::Null);
        let _ = self
            .pipeline
            .state(gst::ClockTime::from_seconds(timing::STOP_TIMEOUT_SECS));
    }
}
