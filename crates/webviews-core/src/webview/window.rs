//! Native window attributes, sizing and foreign-parent embedding.

use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::{Window, WindowAttributes};
use wry::raw_window_handle::{HandleError, HasWindowHandle, RawWindowHandle, WindowHandle};

use webviews_common::WindowSizeHint;

use crate::config::WebviewConfig;

/// Window geometry and title, tracked before and after the window exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSpec {
    pub(crate) title: String,
    pub(crate) size: (u32, u32),
    pub(crate) min: Option<(u32, u32)>,
    pub(crate) max: Option<(u32, u32)>,
    pub(crate) resizable: bool,
}

impl WindowSpec {
    pub(crate) fn from_config(config: &WebviewConfig) -> Self {
        let mut spec = Self {
            title: config.title.clone(),
            size: (config.width, config.height),
            min: None,
            max: None,
            resizable: true,
        };
        spec.apply(config.width, config.height, config.size_hint);
        spec
    }

    /// Record a size request the way the native window will interpret it.
    pub(crate) fn apply(&mut self, width: u32, height: u32, hint: WindowSizeHint) {
        match hint {
            WindowSizeHint::None => {
                self.size = (width, height);
                self.resizable = true;
            }
            WindowSizeHint::Min => self.min = Some((width, height)),
            WindowSizeHint::Max => self.max = Some((width, height)),
            WindowSizeHint::Fixed => {
                self.size = (width, height);
                self.resizable = false;
            }
        }
    }

    pub(crate) fn attributes(&self) -> WindowAttributes {
        let mut attrs = WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(logical(self.size))
            .with_resizable(self.resizable);
        if let Some(min) = self.min {
            attrs = attrs.with_min_inner_size(logical(min));
        }
        if let Some(max) = self.max {
            attrs = attrs.with_max_inner_size(logical(max));
        }
        attrs
    }
}

fn logical((width, height): (u32, u32)) -> LogicalSize<f64> {
    LogicalSize::new(f64::from(width), f64::from(height))
}

/// Apply a size request to a live window.
pub(crate) fn apply_size(window: &Window, width: u32, height: u32, hint: WindowSizeHint) {
    let size = logical((width, height));
    match hint {
        WindowSizeHint::None | WindowSizeHint::Fixed => {
            window.set_resizable(hint.is_resizable());
            let _ = window.request_inner_size(size);
        }
        WindowSizeHint::Min => window.set_min_inner_size(Some(size)),
        WindowSizeHint::Max => window.set_max_inner_size(Some(size)),
    }
}

/// Bounds covering a parent area of the given physical size.
pub(crate) fn full_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

/// Bounds for a webview embedded in a foreign parent of known logical size.
pub(crate) fn logical_bounds(width: u32, height: u32) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            f64::from(width),
            f64::from(height),
        )),
    }
}

/// A window owned by someone else, identified only by its raw handle.
pub(crate) struct ParentWindow(pub(crate) RawWindowHandle);

impl HasWindowHandle for ParentWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        // SAFETY: `WebviewConfig::with_parent_window` requires the caller to
        // keep the parent alive for as long as the webview exists.
        Ok(unsafe { WindowHandle::borrow_raw(self.0) })
    }
}
