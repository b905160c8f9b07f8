//! Recurring tick scheduling.
//!
//! The engine decides *when* ticks should run (start schedules, pause and
//! load cancel); the host loop decides *how* to wait for them. The host asks
//! [`TickScheduler::next_deadline`] how long it may block and calls
//! [`TickScheduler::poll_due`] afterwards, so at most one tick is ever in
//! flight.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Schedules the engine's recurring tick.
pub trait TickScheduler {
    /// Start (or restart) ticking every `interval`.
    fn schedule_repeating(&mut self, interval: Duration);

    /// Stop ticking. No-op when nothing is scheduled.
    fn cancel(&mut self);

    /// Whether a recurring tick is scheduled.
    fn is_scheduled(&self) -> bool;

    /// Time left until the next tick, `None` when nothing is scheduled.
    fn next_deadline(&self) -> Option<Duration>;

    /// Returns true if a tick is due, and arms the following one.
    fn poll_due(&mut self) -> bool;
}

/// Real-time scheduler driven by [`Instant`].
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    interval: Option<Duration>,
    next_due: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.next_due = Some(Instant::now() + interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
        self.next_due = None;
    }

    fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(Instant::now()))
    }

    fn poll_due(&mut self) -> bool {
        let (Some(interval), Some(due)) = (self.interval, self.next_due) else {
            return false;
        };
        let now = Instant::now();
        if now < due {
            return false;
        }
        if interval.is_zero() {
            self.next_due = Some(now);
            return true;
        }
        // Skip missed slots instead of firing a burst of catch-up ticks
        let mut next = due + interval;
        while next <= now {
            next += interval;
        }
        self.next_due = Some(next);
        true
    }
}

/// What a [`ManualScheduler`] has been asked to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualSchedule {
    /// Interval of the active schedule
    pub interval: Option<Duration>,
    /// Times `schedule_repeating` was called
    pub scheduled: usize,
    /// Times `cancel` was called while scheduled
    pub cancelled: usize,
    /// Ticks fired by the test and not yet polled
    pub pending: usize,
}

/// Test scheduler: ticks fire only when the test says so. Clones share
/// state, so the test keeps a handle while the engine owns the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualSchedule>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one tick as due (ignored while nothing is scheduled).
    pub fn fire(&self) {
        let mut state = self.state.borrow_mut();
        if state.interval.is_some() {
            state.pending += 1;
        }
    }

    /// Snapshot of the recorded calls.
    pub fn snapshot(&self) -> ManualSchedule {
        self.state.borrow().clone()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) {
        let mut state = self.state.borrow_mut();
        state.interval = Some(interval);
        state.scheduled += 1;
    }

    fn cancel(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.interval.take().is_some() {
            state.cancelled += 1;
        }
        state.pending = 0;
    }

    fn is_scheduled(&self) -> bool {
        self.state.borrow().interval.is_some()
    }

    fn next_deadline(&self) -> Option<Duration> {
        let state = self.state.borrow();
        state.interval.map(|interval| {
            if state.pending > 0 {
                Duration::ZERO
            } else {
                interval
            }
        })
    }

    fn poll_due(&mut self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.pending == 0 {
            return false;
        }
        state.pending -= 1;
        true
    }
}
