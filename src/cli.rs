// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing the filter registry
//! - Taking a filtered photo
//! - Recording a clip

use filter_camera::config::Config;
use filter_camera::constants::timing;
use filter_camera::errors::AppError;
use filter_camera::filters::FilterType;
use filter_camera::session::CaptureSession;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// List all filters in registry order
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        let desc = filter.descriptor();
        let mut parts = Vec::new();
        if desc.brightness != 1.0 {
            parts.push(format!("brightness {}", desc.brightness));
        }
        if desc.contrast != 1.0 {
            parts.push(format!("contrast {}", desc.contrast));
        }
        if desc.saturate != 1.0 {
            parts.push(format!("saturate {}", desc.saturate));
        }
        if desc.sepia > 0.0 {
            parts.push(format!("sepia {}", desc.sepia));
        }
        if desc.hue_rotate_deg != 0.0 {
            parts.push(format!("hue-rotate {}°", desc.hue_rotate_deg));
        }
        if desc.blur_px > 0.0 {
            parts.push(format!("blur {}px", desc.blur_px));
        }
        if desc.grayscale > 0.0 {
            parts.push(format!("grayscale {}", desc.grayscale));
        }
        let effect = if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        };
        println!("  {:<12} {}", filter.name(), effect);
    }
    Ok(())
}

/// Take a single photo with the given filter
pub fn take_photo(
    filter: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if let Some(dir) = output {
        config.output_dir = Some(dir);
    }

    let mut session = acquire_session(&config)?;
    if let Some(name) = filter {
        session.select_filter_by_name(&name)?;
    }

    println!("Capturing with filter: {}", session.selected_filter());

    // Let auto-exposure settle before grabbing the frame
    let device = session
        .device()
        .ok_or_else(|| AppError::DeviceUnavailable("no camera".to_string()))?;
    let frame = device.wait_for_frame(timing::WARMUP, timing::FIRST_FRAME_TIMEOUT)?;
    println!("Capture format: {}x{}", frame.width, frame.height);

    let rt = tokio::runtime::Runtime::new()?;
    let path = rt.block_on(session.capture_photo())?;

    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Record a clip for up to `duration` seconds (Ctrl+C stops early)
pub fn record(
    duration: u64,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if let Some(dir) = output {
        config.output_dir = Some(dir);
    }

    let mut session = acquire_session(&config)?;

    println!("Output: {}", session.output_dir().display());
    println!("Duration: {} seconds", duration);
    println!();
    println!("Recording... (press Ctrl+C to stop early)");

    session.start_recording()?;

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    // Wait for duration or Ctrl+C
    let start = Instant::now();
    let target_duration = Duration::from_secs(duration);

    while start.elapsed() < target_duration {
        if stop_flag.load(std::sync::atomic::Ordering::SeqCst) {
            println!();
            println!("Stopping early...");
            break;
        }

        let elapsed = start.elapsed().as_secs();
        print!("\rRecording: {:02}:{:02}", elapsed / 60, elapsed % 60);
        std::io::Write::flush(&mut std::io::stdout())?;

        std::thread::sleep(Duration::from_millis(100));
    }
    println!();

    let rt = tokio::runtime::Runtime::new()?;
    let path = rt.block_on(session.stop_recording())?;
    println!("Recording saved: {}", path.display());

    Ok(())
}

/// Acquire the camera or fail with a user-visible error
fn acquire_session(config: &Config) -> Result<CaptureSession, Box<dyn std::error::Error>> {
    let session = CaptureSession::acquire(config);
    if !session.has_device() {
        return Err(Box::new(AppError::DeviceUnavailable(
            "permission denied or no camera present".to_string(),
        )));
    }
    Ok(session)
}
