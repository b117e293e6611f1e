//! Timers fired by the main event loop.
//!
//! The queue is plain data: the event loop asks for the next deadline,
//! takes due timers out, runs their callbacks without holding the queue
//! lock, then hands them back so repeating timers re-arm. Clearing a
//! timer while its callback runs stops the re-arm; clearing one that is
//! due later in the same batch stops it from firing.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::dispatch::lock;

/// Shortest period a repeating timer may have.
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// Identifies a scheduled timer. Returned by `set_timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) type TimerCallback = Box<dyn FnMut() + Send>;

pub(crate) struct Timer {
    deadline: Instant,
    interval: Duration,
    repeat: bool,
    callback: TimerCallback,
}

impl Timer {
    pub(crate) fn fire(&mut self) {
        (self.callback)();
    }
}

/// Armed timers keyed by id.
pub struct TimerQueue {
    next_id: u64,
    min_interval: Duration,
    armed: HashMap<TimerId, Timer>,
    /// Timers taken out by `take_due` and not yet handed back.
    firing: HashSet<TimerId>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::with_min_interval(Duration::ZERO)
    }

    /// Every interval shorter than `min_interval` is raised to it.
    pub fn with_min_interval(min_interval: Duration) -> Self {
        Self {
            next_id: 1,
            min_interval,
            armed: HashMap::new(),
            firing: HashSet::new(),
        }
    }

    pub(crate) fn insert(
        &mut self,
        now: Instant,
        interval: Duration,
        repeat: bool,
        callback: TimerCallback,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let mut interval = interval.max(self.min_interval);
        if repeat {
            interval = interval.max(MIN_REPEAT_INTERVAL);
        }
        self.armed.insert(
            id,
            Timer {
                deadline: now + interval,
                interval,
                repeat,
                callback,
            },
        );
        id
    }

    /// Cancel a timer. Returns `false` if it already fired (one-shot),
    /// was cleared before, or never existed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.armed.remove(&id).is_some() || self.firing.remove(&id)
    }

    /// Drop every timer, including ones currently firing.
    pub fn clear_all(&mut self) {
        self.armed.clear();
        self.firing.clear();
    }

    /// Earliest deadline among armed timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.values().map(|t| t.deadline).min()
    }

    /// Remove every timer due at `now`, ordered by deadline then id.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<(TimerId, Timer)> {
        let mut due: Vec<TimerId> = self
            .armed
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        due.sort_by_key(|id| (self.armed[id].deadline, *id));

        due.into_iter()
            .filter_map(|id| {
                let timer = self.armed.remove(&id)?;
                self.firing.insert(id);
                Some((id, timer))
            })
            .collect()
    }

    /// Whether a timer taken by `take_due` is still live.
    pub(crate) fn is_firing(&self, id: TimerId) -> bool {
        self.firing.contains(&id)
    }

    /// Hand back a fired timer. Repeating timers re-arm on their original
    /// cadence; missed periods are skipped rather than replayed.
    pub(crate) fn finish(&mut self, id: TimerId, mut timer: Timer, now: Instant) {
        if !self.firing.remove(&id) || !timer.repeat {
            return;
        }
        let next = timer.deadline + timer.interval;
        timer.deadline = if next > now { next } else { now + timer.interval };
        self.armed.insert(id, timer);
    }

    /// Number of live timers, counting ones currently firing.
    pub fn len(&self) -> usize {
        self.armed.len() + self.firing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire every timer due at `now`, returning how many ran.
///
/// Callbacks run without the lock held, so they may arm or clear timers.
/// A timer cleared by an earlier callback of the batch does not run.
pub(crate) fn fire_due(timers: &Mutex<TimerQueue>, now: Instant) -> usize {
    let due = lock(timers).take_due(now);
    let mut fired = 0;
    for (id, mut timer) in due {
        if !lock(timers).is_firing(id) {
            trace!(timer = %id, "timer cleared before it could fire");
            continue;
        }
        trace!(timer = %id, "timer fired");
        timer.fire();
        fired += 1;
        lock(timers).finish(id, timer, now);
    }
    fired
}
