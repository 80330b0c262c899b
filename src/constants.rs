// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Fixed file name for captured stills
pub const PHOTO_FILE_NAME: &str = "photo.png";

/// Fixed file name for finalized recordings
pub const RECORDING_FILE_NAME: &str = "recording.webm";

/// Default folder name for saving photos and recordings
pub const DEFAULT_SAVE_FOLDER: &str = "FilterCamera";

/// Capture pipeline tuning
pub mod pipeline {
    /// Maximum buffers queued in the preview appsink before old frames drop
    pub const MAX_BUFFERS: u32 = 2;
}

/// Timing constants for pipeline startup/teardown and the CLI capture flow
pub mod timing {
    use std::time::Duration;

    /// Seconds to wait for the preview pipeline to reach PLAYING
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Seconds to wait for a pipeline to reach NULL on teardown
    pub const STOP_TIMEOUT_SECS: u64 = 3;

    /// Camera warm-up period before a CLI photo is taken (auto-exposure
    /// needs a few frames to settle)
    pub const WARMUP: Duration = Duration::from_millis(500);

    /// How long the CLI waits for a first frame before giving up
    pub const FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(5);

    /// Terminal input poll interval (roughly one 60 Hz frame)
    pub const INPUT_POLL: Duration = Duration::from_millis(16);
}
