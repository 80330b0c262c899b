// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the capture session
//!
//! A session built without a device models denied camera permission: every
//! capture or record attempt must surface `DeviceUnavailable` instead of
//! crashing, and filter selection keeps working.

use filter_camera::{AppError, CaptureSession, FilterType};
use std::path::PathBuf;

fn denied_session() -> CaptureSession {
    CaptureSession::new(None, FilterType::Normal, PathBuf::from("/tmp/filter-camera-tests"))
}

#[tokio::test]
async fn test_denied_device_photo_is_device_unavailable() {
    let session = denied_session();
    match session.capture_photo().await {
        Err(AppError::DeviceUnavailable(_)) => {}
        other => panic!("expected DeviceUnavailable, got {:?}", other.map(|p| p.display().to_string())),
    }
}

#[test]
fn test_denied_device_record_is_device_unavailable() {
    let mut session = denied_session();
    match session.start_recording() {
        Err(AppError::DeviceUnavailable(_)) => {}
        other => panic!("expected DeviceUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stop_while_idle_produces_no_download() {
    let dir = tempfile::tempdir().unwrap();
    let mut session =
        CaptureSession::new(None, FilterType::Normal, dir.path().to_path_buf());

    let result = session.stop_recording().await;
    assert!(matches!(result, Err(AppError::RecorderState(_))));
    assert!(
        std::fs::read_dir(dir.path()).unwrap().next().is_none(),
        "stop() from Idle must not write an artifact"
    );
}

#[test]
fn test_filter_selection_is_sourced_from_the_registry() {
    let mut session = denied_session();

    // every registry name is selectable
    for filter in FilterType::ALL {
        session.select_filter_by_name(filter.name()).unwrap();
        assert_eq!(session.selected_filter(), filter);
    }

    // anything else fails loudly without changing the selection
    let before = session.selected_filter();
    assert!(matches!(
        session.select_filter_by_name("Noir"),
        Err(AppError::UnknownFilter(_))
    ));
    assert_eq!(session.selected_filter(), before);
}

#[test]
fn test_preview_and_capture_share_one_descriptor() {
    // The session exposes a single descriptor per filter; both the preview
    // shading and the still renderer read it through the same accessor, so
    // switching the filter changes both identically.
    let mut session = denied_session();

    session.select_filter(FilterType::Sharp);
    let sharp = session.selected_filter().descriptor();
    assert_eq!(sharp.contrast, 1.4);

    session.select_filter(FilterType::BlackWhite);
    let bw = session.selected_filter().descriptor();
    assert_eq!(bw.grayscale, 1.0);
    assert_ne!(sharp, bw);
}
