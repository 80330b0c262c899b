// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera/microphone unavailable: permission denied, no device, or the
    /// capture pipeline could not be started
    DeviceUnavailable(String),
    /// Filter name not present in the registry (programming error - the
    /// selection UI is sourced from the registry itself)
    UnknownFilter(String),
    /// Still capture attempted before the device produced a frame with
    /// known dimensions
    NoActiveFrame,
    /// Recorder start/stop called out of sequence
    RecorderState(&'static str),
    /// GStreamer pipeline failure during an established capture
    Pipeline(String),
    /// Storage/filesystem errors
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            AppError::UnknownFilter(name) => write!(f, "Unknown filter: {}", name),
            AppError::NoActiveFrame => write!(f, "No frame available for capture"),
            AppError::RecorderState(msg) => write!(f, "Recorder state error: {}", msg),
            AppError::Pipeline(msg) => write!(f, "Pipeline error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Storage(err.to_string())
    }
}
