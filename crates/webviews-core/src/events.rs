//! Webview event types and the broadcast bus that carries them.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebviewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// JavaScript invoked a bound function.
    BindingCalled { name: String, seq: String },
    /// The native window was closed.
    Closed,
    /// The event loop was asked to stop.
    Terminated,
}

pub struct EventBus {
    sender: broadcast::Sender<WebviewEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WebviewEvent> {
        self.sender.subscribe()
    }

    /// Publish to all current subscribers; returns how many received it.
    pub fn publish(&self, event: WebviewEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
