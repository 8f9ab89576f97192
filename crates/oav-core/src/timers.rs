//! Periodic scheduling
//!
//! The monitor only needs a cancellable periodic callback. [`Scheduler`] is
//! that seam; [`TimerQueue`] is a deterministic virtual-clock
//! implementation that callers advance explicitly.

use std::collections::BTreeMap;
use std::time::Duration;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u32);

/// Host periodic-callback primitive
pub trait Scheduler {
    /// Register a repeating timer. The first firing is one interval from now.
    fn schedule_periodic(&mut self, interval: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Timer entry
#[derive(Debug, Clone)]
struct Timer {
    interval: Duration,
    next_due: Duration,
}

/// Virtual-clock timer queue
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u32,
    timers: BTreeMap<TimerId, Timer>,
    /// Firings recorded by `advance_queued` and not yet collected
    fired: BTreeMap<TimerId, u32>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return the timers that fired.
    ///
    /// Firings are ordered by due time, then by registration order. A timer
    /// due several times within `by` appears once per firing.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut fired = Vec::new();

        while let Some((id, due)) = self.next_firing(target) {
            self.now = due;
            if let Some(timer) = self.timers.get_mut(&id) {
                timer.next_due = due + timer.interval;
            }
            fired.push(id);
        }

        self.now = target;
        fired
    }

    /// Move the clock forward, keeping every firing queued for its owner.
    pub fn advance_queued(&mut self, by: Duration) {
        for id in self.advance(by) {
            *self.fired.entry(id).or_insert(0) += 1;
        }
    }

    /// Collect the queued firings of `id`.
    pub fn take_fired(&mut self, id: TimerId) -> u32 {
        self.fired.remove(&id).unwrap_or(0)
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Is this timer still registered?
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Get time until next timer fires
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers
            .values()
            .map(|t| t.next_due.saturating_sub(self.now))
            .min()
    }

    fn next_firing(&self, limit: Duration) -> Option<(TimerId, Duration)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.next_due <= limit)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, t)| (*id, t.next_due))
    }
}

impl Scheduler for TimerQueue {
    fn schedule_periodic(&mut self, interval: Duration) -> TimerId {
        // A zero interval would fire forever within a single advance.
        let interval = interval.max(Duration::from_millis(1));
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            Timer {
                interval,
                next_due: self.now + interval,
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
        self.fired.remove(&id);
    }
}
