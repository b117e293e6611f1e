//! Window configuration types.

use serde::{Deserialize, Serialize};
use webviews_common::WindowSizeHint;

/// Defaults applied to every new webview window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels (valid range: 1-16384).
    pub width: u32,
    /// Initial inner height in logical pixels (valid range: 1-16384).
    pub height: u32,
    pub size_hint: WindowSizeHint,
    /// Enable developer tools where the platform supports them.
    pub debug: bool,
    /// Exit the event loop once the window is closed.
    pub auto_terminate: bool,
    pub user_agent: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 1024,
            height: 768,
            size_hint: WindowSizeHint::None,
            debug: false,
            auto_terminate: true,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert_eq!(config.size_hint, WindowSizeHint::None);
        assert!(!config.debug);
        assert!(config.auto_terminate);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn window_config_partial_toml() {
        let toml_str = r#"
title = "Dashboard"
width = 640
size_hint = "fixed"
debug = true
"#;
        let config: WindowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.title, "Dashboard");
        assert_eq!(config.width, 640);
        assert_eq!(config.size_hint, WindowSizeHint::Fixed);
        assert!(config.debug);
        // Defaults preserved
        assert_eq!(config.height, 768);
        assert!(config.auto_terminate);
    }

    #[test]
    fn unknown_size_hint_is_rejected() {
        let result: Result<WindowConfig, _> = toml::from_str("size_hint = \"huge\"");
        assert!(result.is_err());
    }
}
