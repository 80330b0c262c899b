// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use filter_camera::{Config, FilterType};

#[test]
fn test_config_default() {
    let config = Config::default();

    // Check sensible defaults
    assert_eq!(config.startup_filter, FilterType::Normal);
    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert!(config.output_dir.is_none());
}

#[test]
fn test_default_output_dir_uses_save_folder() {
    let config = Config::default();
    let dir = config.resolve_output_dir();
    assert!(
        dir.ends_with(filter_camera::constants::DEFAULT_SAVE_FOLDER),
        "default output dir should end in the save folder, got {}",
        dir.display()
    );
}

#[test]
fn test_config_serde_roundtrip() {
    let config = Config {
        output_dir: Some(std::path::PathBuf::from("/data/camera")),
        startup_filter: FilterType::Vibrant,
        mirror_preview: false,
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
