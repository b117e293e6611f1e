use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use webviews_common::{WebviewError, WebviewId, WindowSizeHint};

use crate::dispatch::{lock, Command, CommandQueue, LoopWaker};
use crate::events::{EventBus, WebviewEvent};
use crate::rpc::script::reply_script;
use crate::rpc::{typed_reply, RawHandler, RpcBridge, RpcRequest};
use crate::timer::{TimerId, TimerQueue};

use super::context::WebviewContext;

/// Capacity of the event broadcast channel.
const EVENT_CAPACITY: usize = 64;

/// State shared between the event loop and every handle.
pub(crate) struct Shared {
    pub(crate) id: WebviewId,
    pub(crate) commands: CommandQueue,
    pub(crate) bridge: Mutex<RpcBridge>,
    pub(crate) timers: Mutex<TimerQueue>,
    pub(crate) events: EventBus,
    terminated: AtomicBool,
}

/// Thread-safe handle to a webview.
///
/// Every operation is queued and applied on the main thread in the order
/// it was issued, so a handle may be cloned into background threads,
/// timers and binding callbacks.
#[derive(Clone)]
pub struct WebviewHandle {
    shared: Arc<Shared>,
}

impl WebviewHandle {
    pub(crate) fn new(waker: impl LoopWaker + 'static, min_timer_interval: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: WebviewId::new(),
                commands: CommandQueue::new(waker),
                bridge: Mutex::new(RpcBridge::new()),
                timers: Mutex::new(TimerQueue::with_min_interval(min_timer_interval)),
                events: EventBus::new(EVENT_CAPACITY),
                terminated: AtomicBool::new(false),
            }),
        }
    }

    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }

    pub fn id(&self) -> &WebviewId {
        &self.shared.id
    }

    /// Post `f` to run on the main thread. Only needed to reach the native
    /// window or engine directly.
    pub fn dispatch<F>(&self, f: F)
    where
        F: FnOnce(&WebviewContext<'_>) + Send + 'static,
    {
        self.push(Command::Dispatch(Box::new(f)));
    }

    /// Stop the main loop. Safe to call from any thread.
    pub fn terminate(&self) {
        if self.mark_terminated() {
            debug!(webview = %self.id(), "terminate requested");
        }
        self.push(Command::Terminate);
    }

    /// Set the terminated flag. Returns whether it was newly set.
    pub(crate) fn mark_terminated(&self) -> bool {
        !self.shared.terminated.swap(true, Ordering::SeqCst)
    }

    pub fn is_terminated(&self) -> bool {
        self.shared.terminated.load(Ordering::SeqCst)
    }

    /// Close the native window.
    pub fn close(&self) {
        self.push(Command::Close);
    }

    /// Close the window, drop all bindings, pending calls and timers, and
    /// stop the main loop.
    pub fn destroy(&self) {
        lock(&self.shared.bridge).clear();
        lock(&self.shared.timers).clear_all();
        self.close();
        self.terminate();
    }

    /// Set the native window title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.push(Command::SetTitle(title.into()));
    }

    /// Set the native window size, interpreted according to `hint`.
    pub fn resize(&self, width: u32, height: u32, hint: WindowSizeHint) -> Result<(), WebviewError> {
        if width == 0 || height == 0 {
            return Err(WebviewError::InvalidSize { width, height });
        }
        self.push(Command::Resize {
            width,
            height,
            hint,
        });
        Ok(())
    }

    /// Navigate to a URL. Data URIs such as `data:text/html,...` work too.
    pub fn navigate(&self, url: impl Into<String>) {
        self.push(Command::Navigate(url.into()));
    }

    /// Replace the page with the given HTML.
    pub fn set_html(&self, html: impl Into<String>) {
        self.push(Command::SetHtml(html.into()));
    }

    /// Run `js` on every new page before `window.onload`.
    pub fn init(&self, js: impl Into<String>) {
        self.push(Command::Init(js.into()));
    }

    /// Evaluate `js` asynchronously. The result is ignored; use a binding
    /// to get values back.
    pub fn eval(&self, js: impl Into<String>) {
        self.push(Command::Eval(js.into()));
    }

    /// Expose `f` as a global async JavaScript function called `name`.
    ///
    /// `f` receives the call sequence and the arguments as a JSON array
    /// string, and must answer through [`return_raw`](Self::return_raw).
    pub fn bind_raw<F>(&self, name: &str, f: F) -> Result<(), WebviewError>
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.bind_handler(name, Arc::new(move |_: &WebviewHandle, seq: &str, req: &str| f(seq, req)))
    }

    /// Expose a typed callback as a global async JavaScript function.
    ///
    /// Arguments are decoded into `A` (use a tuple for positional
    /// arguments) and the result is encoded back automatically. `Err`
    /// rejects the JavaScript promise with the error message.
    pub fn bind<A, R, E, F>(&self, name: &str, f: F) -> Result<(), WebviewError>
    where
        A: DeserializeOwned + 'static,
        R: Serialize + 'static,
        E: std::fmt::Display + 'static,
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        let handler: RawHandler = Arc::new(move |handle: &WebviewHandle, seq: &str, req: &str| {
            let (success, result) = typed_reply(&f, req);
            if let Err(e) = handle.return_raw(seq, success, &result) {
                warn!(seq, error = %e, "failed to deliver binding result");
            }
        });
        self.bind_handler(name, handler)
    }

    fn bind_handler(&self, name: &str, handler: RawHandler) -> Result<(), WebviewError> {
        lock(&self.shared.bridge).bind(name, handler)?;
        debug!(webview = %self.id(), name, "function bound");
        self.push(Command::BindingAdded(name.to_string()));
        Ok(())
    }

    /// Remove a binding and delete its JavaScript global.
    pub fn unbind(&self, name: &str) -> Result<(), WebviewError> {
        lock(&self.shared.bridge).unbind(name)?;
        debug!(webview = %self.id(), name, "function unbound");
        self.push(Command::BindingRemoved(name.to_string()));
        Ok(())
    }

    /// Answer a pending call. `result` must be valid JSON; on failure it
    /// becomes the promise's rejection value.
    pub fn return_raw(&self, seq: &str, success: bool, result: &str) -> Result<(), WebviewError> {
        serde_json::from_str::<serde_json::Value>(result)
            .map_err(|e| WebviewError::InvalidJson(e.to_string()))?;
        let method = lock(&self.shared.bridge).complete(seq)?;
        debug!(webview = %self.id(), seq, method = %method, success, "call answered");
        self.push(Command::Eval(reply_script(seq, success, result)));
        Ok(())
    }

    /// Call `f` after `interval` on the event loop; with `repeat`, keep
    /// calling it every `interval` until cleared.
    pub fn set_timeout<F>(&self, interval: Duration, repeat: bool, f: F) -> TimerId
    where
        F: FnMut() + Send + 'static,
    {
        let id = lock(&self.shared.timers).insert(Instant::now(), interval, repeat, Box::new(f));
        debug!(webview = %self.id(), timer = %id, ?interval, repeat, "timer armed");
        self.shared.commands.wake();
        id
    }

    /// Cancel a timer. Returns whether a live timer was cancelled.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        lock(&self.shared.timers).clear(id)
    }

    /// Receive webview events.
    pub fn subscribe(&self) -> broadcast::Receiver<WebviewEvent> {
        self.shared.events.subscribe()
    }

    pub(crate) fn push(&self, command: Command) {
        self.shared.commands.push(command);
    }

    pub(crate) fn publish(&self, event: WebviewEvent) {
        self.shared.events.publish(event);
    }

    /// Route an IPC body from the engine to its binding. Calls to unbound
    /// names are rejected right away.
    pub(crate) fn deliver_ipc(&self, body: &str) {
        let Some(request) = RpcRequest::from_json(body) else {
            warn!(
                webview = %self.id(),
                body_len = body.len(),
                "IPC message rejected: not a call"
            );
            return;
        };

        let handler = lock(&self.shared.bridge).begin(&request);
        match handler {
            Some(handler) => {
                debug!(webview = %self.id(), seq = %request.id, name = %request.method, "binding called");
                self.publish(WebviewEvent::BindingCalled {
                    name: request.method.clone(),
                    seq: request.id.clone(),
                });
                handler(self, &request.id, &request.params_json());
            }
            None => {
                warn!(
                    webview = %self.id(),
                    name = %request.method,
                    "call to unbound function rejected"
                );
                let message = format!("{} is not bound", request.method);
                let result = serde_json::to_string(&message)
                    .unwrap_or_else(|_| "\"not bound\"".to_string());
                self.push(Command::Eval(reply_script(&request.id, false, &result)));
            }
        }
    }
}
