//! Event-loop driver: owns the native window and engine on the main thread.

use std::sync::Mutex;
#[cfg(target_os = "linux")]
use std::time::Duration;
use std::time::Instant;

use tracing::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::window::{Window, WindowId};
use wry::{WebView, WebViewBuilder};

use webviews_common::WebviewError;

use crate::config::WebviewConfig;
use crate::dispatch::{lock, Command, DispatchFn, LoopWaker};
use crate::events::{PageLoadState, WebviewEvent};
use crate::rpc::script::{binding_stub_script, unbind_script, BRIDGE_INIT_SCRIPT};
use crate::timer::fire_due;

use super::context::WebviewContext;
use super::handle::WebviewHandle;
use super::handlers;
use super::window::{apply_size, full_bounds, logical_bounds, ParentWindow, WindowSpec};

/// Page shown when neither a URL nor HTML was given.
const BLANK_PAGE: &str = "<html><body></body></html>";

/// How often GTK gets a chance to run while the loop would otherwise sleep.
#[cfg(target_os = "linux")]
const GTK_PUMP_INTERVAL: Duration = Duration::from_millis(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserEvent {
    Wake,
}

/// Wakes the winit loop through its proxy.
pub(crate) struct ProxyWaker(Mutex<EventLoopProxy<UserEvent>>);

impl ProxyWaker {
    pub(crate) fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self(Mutex::new(proxy))
    }
}

impl LoopWaker for ProxyWaker {
    fn wake(&self) {
        if lock(&self.0).send_event(UserEvent::Wake).is_err() {
            trace!("event loop closed; wake-up dropped");
        }
    }
}

enum Content {
    Url(String),
    Html(String),
    Blank,
}

/// Script added after the engine was built; re-run on each later page.
struct LateScript {
    source: String,
    binding: Option<String>,
    /// Page generation the script last ran on.
    generation: u64,
}

pub(crate) struct WebviewApp {
    handle: WebviewHandle,
    config: WebviewConfig,
    spec: WindowSpec,
    content: Content,
    init_scripts: Vec<String>,
    // The engine must drop before its window.
    webview: Option<WebView>,
    window: Option<Window>,
    deferred: Vec<DispatchFn>,
    late_scripts: Vec<LateScript>,
    page_generation: u64,
    /// Set once the engine was built, or the window closed before that.
    started: bool,
    closed: bool,
    exiting: bool,
    failure: Option<WebviewError>,
}

impl WebviewApp {
    pub(crate) fn new(handle: WebviewHandle, config: WebviewConfig) -> Self {
        let content = match (&config.url, &config.html) {
            (Some(url), _) => Content::Url(url.clone()),
            (None, Some(html)) => Content::Html(html.clone()),
            (None, None) => Content::Blank,
        };
        Self {
            handle,
            spec: WindowSpec::from_config(&config),
            config,
            content,
            init_scripts: Vec::new(),
            webview: None,
            window: None,
            deferred: Vec::new(),
            late_scripts: Vec::new(),
            page_generation: 0,
            started: false,
            closed: false,
            exiting: false,
            failure: None,
        }
    }

    /// Error that stopped the loop before the window came up, if any.
    pub(crate) fn take_failure(&mut self) -> Option<WebviewError> {
        self.failure.take()
    }

    fn context(&self) -> WebviewContext<'_> {
        WebviewContext {
            handle: &self.handle,
            window: self.window.as_ref(),
            webview: self.webview.as_ref(),
            parent: self.config.parent_window(),
        }
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    fn build(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WebviewError> {
        let bindings = lock(&self.handle.shared().bridge).names();
        let stubs: Vec<String> = bindings.iter().map(|n| binding_stub_script(n)).collect();

        let mut builder = WebViewBuilder::new()
            .with_devtools(self.config.debug)
            .with_initialization_script(BRIDGE_INIT_SCRIPT);
        for script in self.init_scripts.iter().chain(&stubs) {
            builder = builder.with_initialization_script(script.as_str());
        }

        if let Some(ua) = &self.config.user_agent {
            builder = builder.with_user_agent(ua.as_str());
        }

        builder = handlers::attach_ipc_handler(builder, self.handle.clone());
        builder = handlers::attach_page_load_handler(builder, self.handle.clone());
        builder = handlers::attach_title_handler(builder, self.handle.clone());

        builder = match &self.content {
            Content::Url(url) => builder.with_url(url.as_str()),
            Content::Html(html) => builder.with_html(html.as_str()),
            Content::Blank => builder.with_html(BLANK_PAGE),
        };

        match self.config.parent_window() {
            Some(raw) => {
                let (width, height) = self.spec.size;
                let webview = builder
                    .with_bounds(logical_bounds(width, height))
                    .build_as_child(&ParentWindow(raw))
                    .map_err(|e| WebviewError::Engine(e.to_string()))?;
                self.webview = Some(webview);
            }
            None => {
                let window = event_loop
                    .create_window(self.spec.attributes())
                    .map_err(|e| WebviewError::Window(e.to_string()))?;
                let webview = builder
                    .build(&window)
                    .map_err(|e| WebviewError::Engine(e.to_string()))?;
                self.webview = Some(webview);
                self.window = Some(window);
            }
        }

        self.started = true;
        info!(
            webview = %self.handle.id(),
            embedded = self.config.parent_window().is_some(),
            bindings = bindings.len(),
            "window and engine created"
        );
        Ok(())
    }

    fn run_deferred(&mut self) {
        let deferred = std::mem::take(&mut self.deferred);
        if deferred.is_empty() {
            return;
        }
        debug!(count = deferred.len(), "running deferred work");
        let ctx = self.context();
        for f in deferred {
            f(&ctx);
        }
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    fn process_commands(&mut self, event_loop: &ActiveEventLoop) {
        self.drain_commands();
        self.sync_exit(event_loop);
    }

    /// Apply everything queued so far. Termination is only recorded here;
    /// `sync_exit` forwards it to the event loop.
    fn drain_commands(&mut self) {
        for command in self.handle.shared().commands.drain() {
            self.apply(command);
        }
    }

    fn sync_exit(&self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
        }
    }

    fn apply(&mut self, command: Command) {
        trace!(command = command.name(), "applying command");
        match command {
            Command::Dispatch(f) => {
                if self.started {
                    f(&self.context());
                } else {
                    self.deferred.push(f);
                }
            }
            Command::SetTitle(title) => {
                if let Some(window) = &self.window {
                    window.set_title(&title);
                }
                self.spec.title = title;
            }
            Command::Resize {
                width,
                height,
                hint,
            } => {
                self.spec.apply(width, height, hint);
                if let Some(window) = &self.window {
                    apply_size(window, width, height, hint);
                }
            }
            Command::Navigate(url) => match &self.webview {
                Some(webview) => {
                    if let Err(e) = webview.load_url(&url) {
                        warn!(url = %url, error = %e, "navigation failed");
                    }
                }
                None => self.content = Content::Url(url),
            },
            Command::SetHtml(html) => match &self.webview {
                Some(webview) => {
                    if let Err(e) = webview.load_html(&html) {
                        warn!(error = %e, "loading HTML failed");
                    }
                }
                None => self.content = Content::Html(html),
            },
            Command::Init(js) => {
                if self.started {
                    self.add_late_script(js, None);
                } else {
                    self.init_scripts.push(js);
                }
            }
            Command::Eval(js) => {
                if self.started {
                    evaluate(self.webview.as_ref(), &js);
                } else {
                    self.deferred
                        .push(Box::new(move |ctx: &WebviewContext<'_>| evaluate(ctx.webview(), &js)));
                }
            }
            // Before the engine exists, stubs come from the bridge at build time.
            Command::BindingAdded(name) => {
                if self.started {
                    let stub = binding_stub_script(&name);
                    self.add_late_script(stub, Some(name));
                }
            }
            Command::BindingRemoved(name) => {
                self.late_scripts
                    .retain(|s| s.binding.as_deref() != Some(name.as_str()));
                if self.started {
                    evaluate(self.webview.as_ref(), &unbind_script(&name));
                }
            }
            Command::Ipc(body) => self.handle.deliver_ipc(&body),
            Command::PageLoad(PageLoadState::Started) => {
                self.page_generation += 1;
                let dropped = lock(&self.handle.shared().bridge).discard_pending();
                if dropped > 0 {
                    debug!(dropped, "pending calls discarded on navigation");
                }
            }
            Command::PageLoad(PageLoadState::Finished) => self.reinject_late_scripts(),
            Command::Close => self.close_window(),
            Command::Terminate => self.terminate(),
        }
    }

    /// Run a script on the current page and remember it for later pages.
    fn add_late_script(&mut self, source: String, binding: Option<String>) {
        evaluate(self.webview.as_ref(), &source);
        self.late_scripts.push(LateScript {
            source,
            binding,
            generation: self.page_generation,
        });
    }

    /// Late scripts that have not run on the current page yet, marked as run.
    fn stale_late_scripts(&mut self) -> Vec<String> {
        let generation = self.page_generation;
        self.late_scripts
            .iter_mut()
            .filter(|s| s.generation != generation)
            .map(|s| {
                s.generation = generation;
                s.source.clone()
            })
            .collect()
    }

    fn reinject_late_scripts(&mut self) {
        for source in self.stale_late_scripts() {
            evaluate(self.webview.as_ref(), &source);
        }
    }

    // =========================================================================
    // TIMERS
    // =========================================================================

    fn fire_due_timers(&self) {
        fire_due(&self.handle.shared().timers, Instant::now());
    }

    fn schedule(&self, event_loop: &ActiveEventLoop) {
        let next = lock(&self.handle.shared().timers).next_deadline();
        #[cfg(target_os = "linux")]
        let next = {
            let pump = Instant::now() + GTK_PUMP_INTERVAL;
            Some(next.map_or(pump, |deadline| deadline.min(pump)))
        };
        event_loop.set_control_flow(control_flow(next));
    }

    // =========================================================================
    // SHUTDOWN
    // =========================================================================

    fn close_window(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.started = true;
        self.webview = None;
        self.window = None;
        info!(webview = %self.handle.id(), "window closed");
        self.handle.publish(WebviewEvent::Closed);

        if self.config.auto_terminate {
            self.terminate();
        }
    }

    fn terminate(&mut self) {
        self.handle.mark_terminated();
        if !self.exiting {
            self.exiting = true;
            info!(webview = %self.handle.id(), "terminating event loop");
            self.handle.publish(WebviewEvent::Terminated);
        }
    }

    /// Free the engine, window, bindings and timers.
    pub(crate) fn teardown(&mut self) {
        self.webview = None;
        self.window = None;
        self.deferred.clear();
        self.late_scripts.clear();
        lock(&self.handle.shared().bridge).clear();
        lock(&self.handle.shared().timers).clear_all();
        debug!(webview = %self.handle.id(), "webview destroyed");
    }
}

impl ApplicationHandler<UserEvent> for WebviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }

        // Fold everything queued before `run` into the initial window.
        self.process_commands(event_loop);
        if self.started || self.exiting {
            return;
        }

        if let Err(e) = self.build(event_loop) {
            error!(webview = %self.handle.id(), error = %e, "failed to create webview");
            self.failure = Some(e);
            self.terminate();
            self.sync_exit(event_loop);
            return;
        }
        self.run_deferred();
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Wake => self.process_commands(event_loop),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                debug!(webview = %self.handle.id(), "window close requested");
                self.close_window();
                self.sync_exit(event_loop);
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(webview) = &self.webview {
                        if let Err(e) = webview.set_bounds(full_bounds(size)) {
                            warn!(error = %e, "failed to resize webview");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        #[cfg(target_os = "linux")]
        pump_gtk();

        self.process_commands(event_loop);
        self.fire_due_timers();
        // Timer callbacks may have queued more work.
        self.process_commands(event_loop);
        self.schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Evaluate a script, logging failures.
fn evaluate(webview: Option<&WebView>, js: &str) {
    if let Some(webview) = webview {
        if let Err(e) = webview.evaluate_script(js) {
            warn!(error = %e, script_len = js.len(), "script evaluation failed");
        }
    }
}

/// Sleep until the next deadline, or until woken when nothing is armed.
fn control_flow(next: Option<Instant>) -> ControlFlow {
    match next {
        Some(deadline) => ControlFlow::WaitUntil(deadline),
        None => ControlFlow::Wait,
    }
}

#[cfg(target_os = "linux")]
fn pump_gtk() {
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}
