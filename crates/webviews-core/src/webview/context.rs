use winit::window::Window;
use wry::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use wry::WebView;

use webviews_common::WebviewError;

use super::handle::WebviewHandle;

/// Main-thread view of a running webview, handed to `dispatch` closures.
pub struct WebviewContext<'a> {
    pub(crate) handle: &'a WebviewHandle,
    pub(crate) window: Option<&'a Window>,
    pub(crate) webview: Option<&'a WebView>,
    pub(crate) parent: Option<RawWindowHandle>,
}

impl<'a> WebviewContext<'a> {
    pub fn handle(&self) -> &WebviewHandle {
        self.handle
    }

    /// The native window, unless the webview is embedded in a foreign
    /// parent or the window was closed.
    pub fn window(&self) -> Option<&'a Window> {
        self.window
    }

    /// The underlying engine, unless the window was closed.
    pub fn webview(&self) -> Option<&'a WebView> {
        self.webview
    }

    /// Platform-specific native window handle: NSWindow on macOS, HWND on
    /// Windows, the X11 window or GtkWindow on Linux. For an embedded
    /// webview this is the parent window.
    ///
    /// Using the handle is unsafe; it is only valid while the window lives.
    pub fn window_handle(&self) -> Result<RawWindowHandle, WebviewError> {
        if let Some(window) = self.window {
            return window
                .window_handle()
                .map(|h| h.as_raw())
                .map_err(|e| WebviewError::Window(e.to_string()));
        }
        self.parent.ok_or(WebviewError::MissingWindow)
    }
}
