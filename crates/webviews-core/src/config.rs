//! Construction options for a `Webview`.

use std::time::Duration;

use webviews_common::WindowSizeHint;
use webviews_config::{WebviewsConfig, WindowConfig};
use wry::raw_window_handle::RawWindowHandle;

/// Configuration for creating a new webview.
#[derive(Debug, Clone)]
pub struct WebviewConfig {
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    pub size_hint: WindowSizeHint,
    /// Enable developer tools where the platform supports them.
    pub debug: bool,
    /// Terminate the event loop once the window is closed.
    pub auto_terminate: bool,
    pub user_agent: Option<String>,
    /// Initial URL to load (takes precedence over `html`).
    pub url: Option<String>,
    /// Initial HTML content to render.
    pub html: Option<String>,
    /// Lower bound applied to every timer interval.
    pub min_timer_interval: Duration,
    parent: Option<RawWindowHandle>,
}

impl Default for WebviewConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 1024,
            height: 768,
            size_hint: WindowSizeHint::None,
            debug: false,
            auto_terminate: true,
            user_agent: None,
            url: None,
            html: None,
            min_timer_interval: Duration::ZERO,
            parent: None,
        }
    }
}

impl WebviewConfig {
    /// Build a config from the `[window]` section of the TOML config.
    pub fn from_window_config(window: &WindowConfig) -> Self {
        Self {
            title: window.title.clone(),
            width: window.width,
            height: window.height,
            size_hint: window.size_hint,
            debug: window.debug,
            auto_terminate: window.auto_terminate,
            user_agent: window.user_agent.clone(),
            ..Default::default()
        }
    }

    /// Build a config from a full loaded config, including timer settings.
    pub fn from_config(config: &WebviewsConfig) -> Self {
        Self {
            min_timer_interval: Duration::from_millis(u64::from(config.timers.min_interval_ms)),
            ..Self::from_window_config(&config.window)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_size_hint(mut self, hint: WindowSizeHint) -> Self {
        self.size_hint = hint;
        self
    }

    /// Shorthand for `WindowSizeHint::Fixed`.
    pub fn size_fixed(self) -> Self {
        self.with_size_hint(WindowSizeHint::Fixed)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_auto_terminate(mut self, auto_terminate: bool) -> Self {
        self.auto_terminate = auto_terminate;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_min_timer_interval(mut self, interval: Duration) -> Self {
        self.min_timer_interval = interval;
        self
    }

    /// Embed the webview into an existing native window instead of
    /// creating a new one. Depending on the platform this is a GtkWindow,
    /// NSWindow or HWND handle.
    ///
    /// # Safety
    ///
    /// The handle must refer to a live window that outlives the webview.
    pub unsafe fn with_parent_window(mut self, parent: RawWindowHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The foreign parent window, if this webview is embedded.
    pub fn parent_window(&self) -> Option<RawWindowHandle> {
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webviews_config::LogLevel;

    #[test]
    fn defaults_match_documented_constructor() {
        let config = WebviewConfig::default();
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.title, "");
        assert!(!config.debug);
        assert!(config.auto_terminate);
        assert_eq!(config.size_hint, WindowSizeHint::None);
        assert!(config.parent_window().is_none());
    }

    #[test]
    fn size_fixed_sets_hint() {
        let config = WebviewConfig::default().with_size(320, 240).size_fixed();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.size_hint, WindowSizeHint::Fixed);
    }

    #[test]
    fn from_config_carries_window_and_timer_settings() {
        let mut file = WebviewsConfig::default();
        file.window.title = "Viewer".into();
        file.window.width = 800;
        file.window.size_hint = WindowSizeHint::Max;
        file.window.auto_terminate = false;
        file.window.user_agent = Some("Viewer/1.0".into());
        file.timers.min_interval_ms = 16;
        file.logging.level = LogLevel::Debug;

        let config = WebviewConfig::from_config(&file);
        assert_eq!(config.title, "Viewer");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 768);
        assert_eq!(config.size_hint, WindowSizeHint::Max);
        assert!(!config.auto_terminate);
        assert_eq!(config.user_agent.as_deref(), Some("Viewer/1.0"));
        assert_eq!(config.min_timer_interval, Duration::from_millis(16));
    }

    #[test]
    fn builder_methods_chain() {
        let config = WebviewConfig::default()
            .with_title("t")
            .with_debug(true)
            .with_auto_terminate(false)
            .with_url("data:text/html,<p>hi</p>");
        assert_eq!(config.title, "t");
        assert!(config.debug);
        assert!(!config.auto_terminate);
        assert_eq!(config.url.as_deref(), Some("data:text/html,<p>hi</p>"));
    }
}
