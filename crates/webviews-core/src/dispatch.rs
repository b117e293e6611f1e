//! Work queue that serializes operations onto the UI thread.
//!
//! Any thread may push a [`Command`]; the event loop drains the queue in
//! FIFO order on the main thread. Every push wakes the loop through a
//! [`LoopWaker`] so queued work never waits for an unrelated OS event.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use webviews_common::WindowSizeHint;

use crate::events::PageLoadState;
use crate::webview::WebviewContext;

/// Wakes a sleeping event loop. Must be callable from any thread.
pub trait LoopWaker: Send + Sync {
    fn wake(&self);
}

/// Closure posted with `dispatch`, run on the main thread.
pub(crate) type DispatchFn = Box<dyn FnOnce(&WebviewContext<'_>) + Send>;

/// A unit of work for the UI thread.
pub(crate) enum Command {
    Dispatch(DispatchFn),
    SetTitle(String),
    Resize {
        width: u32,
        height: u32,
        hint: WindowSizeHint,
    },
    Navigate(String),
    SetHtml(String),
    Init(String),
    Eval(String),
    BindingAdded(String),
    BindingRemoved(String),
    Ipc(String),
    PageLoad(PageLoadState),
    Close,
    Terminate,
}

impl Command {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Dispatch(_) => "dispatch",
            Self::SetTitle(_) => "set_title",
            Self::Resize { .. } => "resize",
            Self::Navigate(_) => "navigate",
            Self::SetHtml(_) => "set_html",
            Self::Init(_) => "init",
            Self::Eval(_) => "eval",
            Self::BindingAdded(_) => "binding_added",
            Self::BindingRemoved(_) => "binding_removed",
            Self::Ipc(_) => "ipc",
            Self::PageLoad(_) => "page_load",
            Self::Close => "close",
            Self::Terminate => "terminate",
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Thread-safe FIFO of pending commands.
pub(crate) struct CommandQueue {
    pending: Mutex<VecDeque<Command>>,
    waker: Box<dyn LoopWaker>,
}

impl CommandQueue {
    pub(crate) fn new(waker: impl LoopWaker + 'static) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            waker: Box::new(waker),
        }
    }

    /// Enqueue a command and wake the event loop.
    pub(crate) fn push(&self, command: Command) {
        lock(&self.pending).push_back(command);
        self.waker.wake();
    }

    /// Wake the loop without queueing work, e.g. after arming a timer.
    pub(crate) fn wake(&self) {
        self.waker.wake();
    }

    /// Take everything queued so far. Commands pushed while the batch is
    /// being processed land in the next batch.
    pub(crate) fn drain(&self) -> VecDeque<Command> {
        std::mem::take(&mut *lock(&self.pending))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock(&self.pending).len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Waker that counts how often it was called.
    #[derive(Clone, Default)]
    pub(crate) struct CountingWaker(pub Arc<AtomicUsize>);

    impl CountingWaker {
        pub(crate) fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl LoopWaker for CountingWaker {
        fn wake(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn push_wakes_loop_once_per_command() {
        let waker = CountingWaker::default();
        let queue = CommandQueue::new(waker.clone());

        queue.push(Command::SetTitle("a".into()));
        queue.push(Command::Terminate);

        assert_eq!(waker.count(), 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn drain_preserves_fifo_order() {
        let queue = CommandQueue::new(CountingWaker::default());
        queue.push(Command::Navigate("about:blank".into()));
        queue.push(Command::Eval("1 + 1".into()));
        queue.push(Command::Close);

        let names: Vec<_> = queue.drain().iter().map(Command::name).collect();
        assert_eq!(names, ["navigate", "eval", "close"]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn wake_does_not_enqueue() {
        let waker = CountingWaker::default();
        let queue = CommandQueue::new(waker.clone());
        queue.wake();
        assert_eq!(waker.count(), 1);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn pushes_from_other_threads_are_collected() {
        let queue = Arc::new(CommandQueue::new(CountingWaker::default()));
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || queue.push(Command::Eval(format!("{i}"))))
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(queue.drain().len(), 4);
    }

    #[test]
    fn debug_prints_command_name() {
        let command = Command::Resize {
            width: 1,
            height: 1,
            hint: WindowSizeHint::Fixed,
        };
        assert_eq!(format!("{command:?}"), "resize");
    }
}
