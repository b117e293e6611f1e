//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&WebviewsConfig::default()).is_ok());
}

#[test]
fn catches_zero_width() {
    let mut config = WebviewsConfig::default();
    config.window.width = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width = 0"));
}

#[test]
fn catches_oversized_height() {
    let mut config = WebviewsConfig::default();
    config.window.height = MAX_WINDOW_DIMENSION + 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.height"));
}

#[test]
fn accepts_dimension_bounds() {
    let mut config = WebviewsConfig::default();
    config.window.width = 1;
    config.window.height = MAX_WINDOW_DIMENSION;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_min_interval_out_of_range() {
    let mut config = WebviewsConfig::default();
    config.timers.min_interval_ms = MAX_MIN_INTERVAL_MS + 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("timers.min_interval_ms"));
}

#[test]
fn catches_filter_with_spaces() {
    let mut config = WebviewsConfig::default();
    config.logging.filter = Some("wry=warn tao=warn".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("logging.filter"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = WebviewsConfig::default();
    config.window.width = 0;
    config.window.height = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
    assert!(err.contains("window.height"));
    assert!(err.contains("; "));
}
