//! Native webview embedding and binding layer.
//!
//! Wraps `winit` and `wry` to provide:
//! - A native window hosting a web rendering engine (`Webview`)
//! - A thread-safe handle that serializes work onto the UI thread
//! - Timers driven by the main event loop
//! - An RPC bridge exposing host callbacks as async JavaScript functions
//!
//! ```rust,no_run
//! use webviews_core::{Webview, WebviewConfig};
//!
//! let webview = Webview::new(WebviewConfig::default().with_title("Hello"))?;
//! webview.bind("add", |(a, b): (i64, i64)| Ok::<_, String>(a + b))?;
//! webview.set_html("<button onclick=\"add(1, 2).then(alert)\">add</button>");
//! webview.run()?;
//! # Ok::<(), webviews_core::WebviewError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod events;
pub mod rpc;
pub mod timer;
pub mod webview;

pub use config::WebviewConfig;
pub use dispatch::LoopWaker;
pub use events::{EventBus, PageLoadState, WebviewEvent};
pub use rpc::{RpcBridge, RpcRequest};
pub use timer::{TimerId, TimerQueue};
pub use webview::{Webview, WebviewContext, WebviewHandle};
pub use webviews_common::{Result, WebviewError, WebviewId, WindowSizeHint};
