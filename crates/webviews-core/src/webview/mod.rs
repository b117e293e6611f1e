//! The native window and its web engine.
//!
//! [`Webview`] owns the event loop and must live on the main thread.
//! Everything else goes through a [`WebviewHandle`], which `Webview`
//! derefs to and which can be cloned into other threads.

mod app;
mod context;
mod handle;
mod handlers;
mod window;

use std::ops::Deref;

use tracing::info;
use winit::event_loop::EventLoop;

use webviews_common::WebviewError;

use crate::config::WebviewConfig;

use self::app::{ProxyWaker, UserEvent, WebviewApp};

pub use context::WebviewContext;
pub use handle::WebviewHandle;

/// A native window hosting a web engine.
pub struct Webview {
    handle: WebviewHandle,
    config: WebviewConfig,
    event_loop: EventLoop<UserEvent>,
}

impl Webview {
    /// Create the event loop. The window itself appears once [`run`](Self::run)
    /// starts; operations issued before that are queued.
    ///
    /// Only one webview may exist per process.
    pub fn new(config: WebviewConfig) -> Result<Self, WebviewError> {
        if config.width == 0 || config.height == 0 {
            return Err(WebviewError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        #[cfg(target_os = "linux")]
        gtk::init().map_err(|e| WebviewError::EventLoop(format!("GTK init failed: {e}")))?;

        let event_loop = EventLoop::<UserEvent>::with_user_event()
            .build()
            .map_err(|e| WebviewError::EventLoop(e.to_string()))?;
        let waker = ProxyWaker::new(event_loop.create_proxy());
        let handle = WebviewHandle::new(waker, config.min_timer_interval);

        info!(
            webview = %handle.id(),
            title = %config.title,
            width = config.width,
            height = config.height,
            hint = %config.size_hint,
            debug = config.debug,
            "webview created"
        );

        Ok(Self {
            handle,
            config,
            event_loop,
        })
    }

    /// Create a webview with the default configuration and the given size.
    pub fn with_size(width: u32, height: u32) -> Result<Self, WebviewError> {
        Self::new(WebviewConfig::default().with_size(width, height))
    }

    /// A handle that can be moved to other threads.
    pub fn handle(&self) -> WebviewHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &WebviewConfig {
        &self.config
    }

    /// Show the window and run the main loop until terminated. The
    /// webview is destroyed when this returns.
    pub fn run(self) -> Result<(), WebviewError> {
        let Self {
            handle,
            config,
            event_loop,
        } = self;

        info!(webview = %handle.id(), "running event loop");
        let mut app = WebviewApp::new(handle.clone(), config);
        let result = event_loop.run_app(&mut app);
        app.teardown();
        info!(webview = %handle.id(), "event loop finished");

        result.map_err(|e| WebviewError::EventLoop(e.to_string()))?;
        match app.take_failure() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Free the webview without running it.
    pub fn destroy(self) {
        self.handle.destroy();
    }
}

impl Deref for Webview {
    type Target = WebviewHandle;

    fn deref(&self) -> &WebviewHandle {
        &self.handle
    }
}
