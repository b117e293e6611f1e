//! Tests for reading, validating and creating the config file.

use super::*;
use webviews_common::{ConfigError, WindowSizeHint};

fn write(dir: &tempfile::TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        r#"
[window]
title = "Viewer"
width = 800
size_hint = "min"
"#,
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "Viewer");
    assert_eq!(config.window.width, 800);
    assert_eq!(config.window.size_hint, WindowSizeHint::Min);
    assert_eq!(config.window.height, 768);
    assert!(!config.window.debug);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "this is not valid toml {{{");
    assert!(matches!(load_from_path(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn out_of_range_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "[window]\nwidth = 0\n");

    match load_from_path(&path) {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("window.width")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn parse_config_validates_without_a_file() {
    assert!(parse_config("[timers]\nmin_interval_ms = 16\n").is_ok());
    assert!(matches!(
        parse_config("[timers]\nmin_interval_ms = 999999\n"),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn first_load_creates_the_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("webviews").join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.window.width, 1024);

    // The written template loads back to the same defaults.
    let reloaded = load_from_path(&path).unwrap();
    assert_eq!(reloaded.window.height, 768);
    assert!(reloaded.window.auto_terminate);
}

#[test]
fn existing_invalid_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "[window]\nheight = 0\n");

    assert!(load_or_create(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[window]\nheight = 0\n");
}

#[test]
fn default_config_path_ends_with_webviews_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with(Path::new("webviews").join("config.toml")));
    }
}
