// SPDX-License-Identifier: MPL-2.0

//! The recording controller: a two-state machine over a WebM encoding
//! pipeline
//!
//! `start()` builds an encoding pipeline over the live devices (video and
//! audio branches muxed into WebM) with an appsink collecting the muxed
//! byte stream chunk by chunk. `stop()` signals EOS, waits for the encoder
//! to finalize, concatenates the accumulated chunks and saves the clip as
//! `recording.webm`.

use super::chunks::ChunkBuffer;
use crate::constants::RECORDING_FILE_NAME;
use crate::errors::{AppError, AppResult};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

/// Video encoders accepted by the WebM muxer, in preference order
const VIDEO_ENCODERS: [&str; 2] = ["vp8enc", "vp9enc"];

/// Audio encoders accepted by the WebM muxer, in preference order
const AUDIO_ENCODERS: [&str; 2] = ["opusenc", "vorbisenc"];

/// Transport elements between the video source and its encoder, in link order
const VIDEO_TRANSPORT: [&str; 2] = ["queue", "videoconvert"];

/// Transport elements between the audio source and its encoder, in link order
const AUDIO_TRANSPORT: [&str; 3] = ["queue", "audioconvert", "audioresample"];

/// Every element factory name the clip pipeline is assembled from, per
/// branch in link order (encoder entries are the preference lists)
///
/// The clip taps the raw device stream: transport, encoding and muxing
/// only. The selected filter never contributes an element here.
pub fn element_inventory() -> Vec<&'static str> {
    let mut names = vec!["pipewiresrc"];
    names.extend_from_slice(&VIDEO_TRANSPORT);
    names.extend_from_slice(&VIDEO_ENCODERS);
    names.push("pipewiresrc");
    names.extend_from_slice(&AUDIO_TRANSPORT);
    names.extend_from_slice(&AUDIO_ENCODERS);
    names.extend_from_slice(&["webmmux", "appsink"]);
    names
}

/// Recording lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// No recording in progress (initial and terminal state)
    #[default]
    Idle,
    /// Chunks are being accumulated
    Recording,
}

impl RecorderState {
    /// Guard for `start()`: only valid from `Idle`
    pub fn ensure_idle(&self) -> AppResult<()> {
        match self {
            RecorderState::Idle => Ok(()),
            RecorderState::Recording => Err(AppError::RecorderState(
                "recording already in progress",
            )),
        }
    }

    /// Guard for `stop()`: only valid from `Recording`
    ///
    /// Stopping from `Idle` is an error by design (not a no-op): it would
    /// otherwise silently swallow a double-stop in the UI layer.
    pub fn ensure_recording(&self) -> AppResult<()> {
        match self {
            RecorderState::Recording => Ok(()),
            RecorderState::Idle => Err(AppError::RecorderState("no recording in progress")),
        }
    }
}

/// An in-flight recording: the pipeline, its chunk buffer and the EOS signal
struct ActiveClip {
    pipeline: gst::Pipeline,
    chunks: Arc<Mutex<ChunkBuffer>>,
    finished: oneshot::Receiver<()>,
}

/// Two-state recording controller
///
/// At most one clip pipeline exists at a time: `start()` from `Recording`
/// is rejected before any encoder is created.
#[derive(Default)]
pub struct RecordingController {
    clip: Option<ActiveClip>,
}

impl RecordingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> RecorderState {
        if self.clip.is_some() {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecorderState::Recording
    }

    /// Start accumulating a new clip
    ///
    /// Valid only from `Idle`. Container is fixed to WebM; codec choice is
    /// delegated to whatever encoder elements the host provides.
    pub fn start(&mut self) -> AppResult<()> {
        self.state().ensure_idle()?;

        info!("Starting recording");
        let clip = ActiveClip::build()?;

        clip.pipeline
            .set_state(gst::State::Playing)
            .map_err(|e| AppError::Pipeline(format!("Failed to start recording: {}", e)))?;

        // Check for immediate errors
        let bus = clip
            .pipeline
            .bus()
            .ok_or_else(|| AppError::Pipeline("No bus available".to_string()))?;
        if let Some(msg) =
            bus.timed_pop_filtered(gst::ClockTime::from_mseconds(500), &[gst::MessageType::Error])
            && let gst::MessageView::Error(err) = msg.view()
        {
            error!(
                error = %err.error(),
                debug = ?err.debug(),
                "GStreamer error during recording start"
            );
            let _ = clip.pipeline.set_state(gst::State::Null);
            return Err(AppError::Pipeline(format!(
                "Recording start error: {}",
                err.error()
            )));
        }

        self.clip = Some(clip);
        Ok(())
    }

    /// Finalize the clip and save it as `recording.webm`
    ///
    /// Valid only from `Recording`; from `Idle` it fails with
    /// [`AppError::RecorderState`] and produces no artifact. The chunk
    /// buffer is only read after the encoder reports completion.
    pub async fn stop(&mut self, output_dir: &Path) -> AppResult<PathBuf> {
        self.state().ensure_recording()?;
        let clip = self
            .clip
            .take()
            .ok_or(AppError::RecorderState("no recording in progress"))?;

        info!("Stopping recording");
        if !clip.pipeline.send_event(gst::event::Eos::new()) {
            warn!("Failed to send EOS event to pipeline");
        }

        // Assembling before all chunks have arrived is a correctness bug:
        // wait for the encoder's completion signal first
        if clip.finished.await.is_err() {
            warn!("Encoder dropped without signaling EOS");
        }

        clip.pipeline
            .set_state(gst::State::Null)
            .map_err(|e| AppError::Pipeline(format!("Failed to stop pipeline: {}", e)))?;

        let data = {
            let mut chunks = clip
                .chunks
                .lock()
                .map_err(|_| AppError::Pipeline("Chunk buffer poisoned".to_string()))?;
            let data = chunks.assemble();
            debug!(
                chunks = chunks.len(),
                bytes = data.len(),
                "Assembled recording"
            );
            chunks.clear();
            data
        };

        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(RECORDING_FILE_NAME);
        tokio::fs::write(&path, data).await?;

        info!(path = %path.display(), "Recording saved");
        Ok(path)
    }
}

impl Drop for RecordingController {
    fn drop(&mut self) {
        if let Some(clip) = self.clip.take() {
            let _ = clip.pipeline.set_state(gst::State::Null);
        }
    }
}

impl ActiveClip {
    /// Build the encoding pipeline: video and audio branches from the live
    /// devices, muxed into WebM, chunked out through an appsink
    fn build() -> AppResult<Self> {
        gst::init().map_err(|e| {
            AppError::DeviceUnavailable(format!("Failed to initialize GStreamer: {}", e))
        })?;

        let pipeline = gst::Pipeline::new();

        // Video branch
        let video_source = gst::ElementFactory::make("pipewiresrc")
            .property("do-timestamp", true)
            .build()
            .map_err(|e| AppError::Pipeline(format!("Failed to create video source: {}", e)))?;
        let video_transport = make_elements(&VIDEO_TRANSPORT)?;
        let video_encoder = select_encoder(&VIDEO_ENCODERS)?;
        if video_encoder
            .factory()
            .map(|f| f.name() == "vp8enc")
            .unwrap_or(false)
        {
            // Realtime deadline, or encoding falls behind the live stream
            video_encoder.set_property("deadline", 1i64);
        }

        // Audio branch
        let audio_source = gst::ElementFactory::make("pipewiresrc")
            .property("do-timestamp", true)
            .build()
            .map_err(|e| AppError::Pipeline(format!("Failed to create audio source: {}", e)))?;
        let audio_transport = make_elements(&AUDIO_TRANSPORT)?;
        let audio_encoder = select_encoder(&AUDIO_ENCODERS)?;

        // Muxer and chunk sink. The appsink cannot seek, so the muxer must
        // emit a streamable byte sequence whose concatenation is the clip.
        let muxer = make_element("webmmux")?;
        if muxer.has_property("streamable") {
            muxer.set_property("streamable", true);
        }

        let appsink = gst::ElementFactory::make("appsink")
            .build()
            .map_err(|e| AppError::Pipeline(format!("Failed to create appsink: {}", e)))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| AppError::Pipeline("Failed to cast to AppSink".to_string()))?;
        appsink.set_property("sync", false);

        let mut elements: Vec<&gst::Element> = vec![&video_source];
        elements.extend(&video_transport);
        elements.push(&video_encoder);
        elements.push(&audio_source);
        elements.extend(&audio_transport);
        elements.push(&audio_encoder);
        elements.push(&muxer);
        elements.push(appsink.upcast_ref::<gst::Element>());
        pipeline
            .add_many(elements)
            .map_err(|e| AppError::Pipeline(format!("Failed to add elements: {}", e)))?;

        let mut video_chain: Vec<&gst::Element> = vec![&video_source];
        video_chain.extend(&video_transport);
        video_chain.push(&video_encoder);
        video_chain.push(&muxer);
        gst::Element::link_many(video_chain)
            .map_err(|_| AppError::Pipeline("Failed to link video branch".to_string()))?;

        let mut audio_chain: Vec<&gst::Element> = vec![&audio_source];
        audio_chain.extend(&audio_transport);
        audio_chain.push(&audio_encoder);
        audio_chain.push(&muxer);
        gst::Element::link_many(audio_chain)
            .map_err(|_| AppError::Pipeline("Failed to link audio branch".to_string()))?;

        muxer
            .link(appsink.upcast_ref::<gst::Element>())
            .map_err(|_| AppError::Pipeline("Failed to link muxer to appsink".to_string()))?;

        // Chunk accumulation: fire-and-forget callbacks append in arrival
        // order; the EOS callback is the completion signal stop() awaits
        let chunks = Arc::new(Mutex::new(ChunkBuffer::new()));
        let sink_chunks = chunks.clone();
        let (finished_tx, finished_rx) = oneshot::channel();
        let finished_tx = Mutex::new(Some(finished_tx));

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let sample = appsink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                    let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;

                    push_chunk(&sink_chunks, map.as_slice().to_vec())?;
                    Ok(gst::FlowSuccess::Ok)
                })
                .eos(move |_| {
                    debug!("Recording pipeline reached EOS");
                    if let Ok(mut tx) = finished_tx.lock()
                        && let Some(tx) = tx.take()
                    {
                        let _ = tx.send(());
                    }
                })
                .build(),
        );

        info!(
            video = ?video_encoder.factory().map(|f| f.name()),
            audio = ?audio_encoder.factory().map(|f| f.name()),
            "Recording pipeline built"
        );

        Ok(Self {
            pipeline,
            chunks,
            finished: finished_rx,
        })
    }
}

fn make_element(name: &str) -> AppResult<gst::Element> {
    gst::ElementFactory::make(name)
        .build()
        .map_err(|e| AppError::Pipeline(format!("Failed to create {}: {}", name, e)))
}

fn make_elements(names: &[&str]) -> AppResult<Vec<gst::Element>> {
    names.iter().map(|name| make_element(name)).collect()
}

/// Append one emitted chunk to the shared buffer
///
/// A poisoned buffer fails the stream loudly; silently skipping the push
/// would drop a chunk and corrupt the assembled clip.
fn push_chunk(chunks: &Mutex<ChunkBuffer>, data: Vec<u8>) -> Result<(), gst::FlowError> {
    let mut chunks = chunks.lock().map_err(|_| gst::FlowError::Error)?;
    chunks.push(data);
    Ok(())
}

/// Pick the first available encoder from a preference list
fn select_encoder(candidates: &[&str]) -> AppResult<gst::Element> {
    for name in candidates {
        match gst::ElementFactory::make(name).build() {
            Ok(element) => {
                debug!(encoder = name, "Selected encoder");
                return Ok(element);
            }
            Err(e) => {
                debug!(encoder = name, error = %e, "Encoder unavailable");
            }
        }
    }
    Err(AppError::Pipeline(format!(
        "No encoder available (tried {})",
        candidates.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_guard_rejects_double_start() {
        // A second start() must not create a second concurrent encoder;
        // the state guard rejects it before any pipeline is built
        assert!(RecorderState::Idle.ensure_idle().is_ok());
        let err = RecorderState::Recording.ensure_idle().unwrap_err();
        assert!(matches!(err, AppError::RecorderState(_)));
    }

    #[test]
    fn test_stop_guard_rejects_idle_stop() {
        assert!(RecorderState::Recording.ensure_recording().is_ok());
        let err = RecorderState::Idle.ensure_recording().unwrap_err();
        assert!(matches!(err, AppError::RecorderState(_)));
    }

    #[tokio::test]
    async fn test_stop_while_idle_errors_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = RecordingController::new();

        assert_eq!(controller.state(), RecorderState::Idle);
        let err = controller.stop(dir.path()).await.unwrap_err();
        assert!(matches!(err, AppError::RecorderState(_)));

        // no download was triggered
        assert!(!dir.path().join(RECORDING_FILE_NAME).exists());
    }

    #[test]
    fn test_controller_starts_idle() {
        let controller = RecordingController::new();
        assert!(!controller.is_recording());
    }

    #[test]
    fn test_push_chunk_fails_loudly_on_poisoned_buffer() {
        let chunks = Arc::new(Mutex::new(ChunkBuffer::new()));

        assert!(push_chunk(&chunks, vec![1, 2]).is_ok());

        // poison the buffer by panicking while holding the lock
        let poisoner = chunks.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        // the chunk must not be silently dropped; the stream errors instead
        let err = push_chunk(&chunks, vec![3]).unwrap_err();
        assert_eq!(err, gst::FlowError::Error);
    }
}
