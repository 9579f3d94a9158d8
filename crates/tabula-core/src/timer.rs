//! One-shot timer bookkeeping.
//!
//! Timers never read the clock themselves: every operation takes the current
//! [`Instant`] from the caller. This keeps timer-driven code (such as the
//! [`Debouncer`](crate::debounce::Debouncer)) deterministic under test and
//! lets the owner decide whether time comes from `std`, tokio, or a UI event
//! loop.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TimerError};

new_key_type! {
    pub struct TimerId;
}

/// Pending one-shot timers, keyed by [`TimerId`].
#[derive(Debug, Default)]
pub struct TimerManager {
    deadlines: SlotMap<TimerId, Instant>,
    // Earliest first. Entries of stopped timers stay until they surface.
    queue: BinaryHeap<Reverse<(Instant, TimerId)>>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer due `duration` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, duration: Duration) -> TimerId {
        let deadline = now + duration;
        let id = self.deadlines.insert(deadline);
        self.queue.push(Reverse((deadline, id)));
        tracing::trace!(target: "tabula_core::timer", ?id, ?duration, "armed");
        id
    }

    /// Disarm `id`. Fails with [`TimerError::InvalidTimerId`] once the timer
    /// has fired or been stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        self.deadlines
            .remove(id)
            .map(|_| tracing::trace!(target: "tabula_core::timer", ?id, "disarmed"))
            .ok_or_else(|| TimerError::InvalidTimerId.into())
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(id)
    }

    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.deadlines.get(id).copied()
    }

    /// Earliest deadline still armed.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if self.deadlines.contains_key(id) {
                return Some(deadline);
            }
            self.queue.pop();
        }
        None
    }

    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    #[tracing::instrument(skip(self), target = "tabula_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if deadline > now {
                break;
            }
            self.queue.pop();
            if self.deadlines.remove(id).is_some() {
                fired.push(id);
            }
        }
        if !fired.is_empty() {
            tracing::trace!(target: "tabula_core::timer", count = fired.len(), "fired");
        }
        fired
    }

    pub fn active_count(&self) -> usize {
        self.deadlines.len()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
        self.queue.clear();
    }
}
