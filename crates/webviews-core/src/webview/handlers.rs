use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::dispatch::Command;
use crate::events::{PageLoadState, WebviewEvent};

use super::handle::WebviewHandle;

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

/// IPC handler: JS -> host. Bodies are queued for the main loop.
pub(super) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    handle: WebviewHandle,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(
                webview = %handle.id(),
                body_len = body.len(),
                "IPC message rejected: invalid JSON"
            );
            return;
        }

        debug!(webview = %handle.id(), body_len = body.len(), "IPC message from JS");
        handle.push(Command::Ipc(body));
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    handle: WebviewHandle,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(webview = %handle.id(), ?state, url = %url, "page load");
        handle.publish(WebviewEvent::PageLoad { state, url });
        handle.push(Command::PageLoad(state));
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    handle: WebviewHandle,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(webview = %handle.id(), title = %title, "title changed");
        handle.publish(WebviewEvent::TitleChanged { title });
    })
}
