//! Debouncing of rapidly-changing input values.
//!
//! A [`Debouncer`] holds back a changing value until it has been stable for a
//! fixed delay. Each new input cancels the previously scheduled commit and
//! schedules a new one, so the committed value changes at most once per quiet
//! period and never while input is still arriving.
//!
//! The debouncer is clock-agnostic: callers pass the current [`Instant`] to
//! [`push`](Debouncer::push) and [`poll`](Debouncer::poll), and use
//! [`deadline`](Debouncer::deadline) to know when to poll next. For code that
//! runs on tokio, [`DebounceTask`] drives a debouncer in a background task and
//! publishes committed values through a watch channel.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tabula_core::Debouncer;
//!
//! let start = Instant::now();
//! let ms = Duration::from_millis;
//! let mut search = Debouncer::new(String::new(), ms(500));
//!
//! search.push("k".to_string(), start);
//! search.push("ki".to_string(), start + ms(100));
//! search.push("kim".to_string(), start + ms(200));
//!
//! assert_eq!(search.poll(start + ms(699)), None);
//! assert_eq!(search.poll(start + ms(700)), Some("kim".to_string()));
//! assert_eq!(search.committed(), "kim");
//! ```

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::{CoreError, Result};
use crate::timer::{TimerId, TimerManager};

/// A value waiting for its quiet period to elapse.
#[derive(Debug)]
struct Pending<T> {
    timer: TimerId,
    value: T,
}

/// Delays propagation of a value until it has been stable for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    timers: TimerManager,
    pending: Option<Pending<T>>,
    committed: T,
    torn_down: bool,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer whose committed value starts as `initial`.
    ///
    /// There is no startup delay: `initial` is visible immediately.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            timers: TimerManager::new(),
            pending: None,
            committed: initial,
            torn_down: false,
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The value visible to downstream consumers.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// The most recent input still waiting for its quiet period.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Whether a commit is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the scheduled commit becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|p| self.timers.deadline(p.timer))
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Record a new input value observed at `now`.
    ///
    /// Any previously scheduled commit is cancelled and a new one is scheduled
    /// at `now + delay`. Inputs after teardown are ignored.
    pub fn push(&mut self, value: T, now: Instant) {
        if self.torn_down {
            tracing::trace!(target: "tabula_core::debounce", "input after teardown ignored");
            return;
        }

        if let Some(previous) = self.pending.take() {
            // The timer can only be missing if it fired without a poll; the
            // superseded value must not be committed either way.
            let _ = self.timers.stop(previous.timer);
        }

        let timer = self.timers.start_one_shot(now, self.delay);
        self.pending = Some(Pending { timer, value });
    }

    /// Commit the pending value if its deadline is at or before `now`.
    ///
    /// Returns the newly committed value when the committed value changed,
    /// `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let fired = self.timers.process_expired(now);
        let pending = self.pending.take_if(|p| fired.contains(&p.timer))?;

        if pending.value == self.committed {
            tracing::trace!(target: "tabula_core::debounce", "quiet period elapsed, value unchanged");
            return None;
        }

        tracing::debug!(target: "tabula_core::debounce", "debounced value committed");
        self.committed = pending.value;
        Some(self.committed.clone())
    }

    /// Tear down the debouncer.
    ///
    /// The pending commit is dropped and no value is ever emitted afterwards.
    pub fn cancel(&mut self) {
        self.timers.clear();
        self.pending = None;
        self.torn_down = true;
    }
}

/// A debouncer running in a tokio task.
///
/// Inputs are sent with [`push`](Self::push); committed values are published
/// on a [`watch`] channel. Dropping the task tears it down: a pending value is
/// discarded and subscribers observe the channel closing.
#[derive(Debug)]
pub struct DebounceTask<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
    handle: JoinHandle<()>,
}

impl<T> DebounceTask<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Spawn the debounce task on the current tokio runtime.
    pub fn spawn(initial: T, delay: Duration) -> Self {
        let (input, mut inputs) = mpsc::unbounded_channel::<T>();
        let (publisher, output) = watch::channel(initial.clone());

        let handle = tokio::spawn(async move {
            let mut debouncer = Debouncer::new(initial, delay);
            loop {
                let wake = debouncer.deadline().map(tokio::time::Instant::from_std);
                tokio::select! {
                    received = inputs.recv() => match received {
                        Some(value) => debouncer.push(value, tokio::time::Instant::now().into_std()),
                        None => break,
                    },
                    () = tokio::time::sleep_until(wake.unwrap_or_else(tokio::time::Instant::now)), if wake.is_some() => {
                        if let Some(value) = debouncer.poll(tokio::time::Instant::now().into_std())
                            && publisher.send(value).is_err()
                        {
                            break;
                        }
                    }
                }
            }
            debouncer.cancel();
        });

        Self {
            input,
            output,
            handle,
        }
    }

    /// Send a new input value.
    pub fn push(&self, value: T) -> Result<()> {
        self.input.send(value).map_err(|_| CoreError::DebounceClosed)
    }

    /// The most recently committed value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// A receiver notified on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    /// Wait for the next committed change.
    pub async fn changed(&mut self) -> Result<T> {
        self.output
            .changed()
            .await
            .map_err(|_| CoreError::DebounceClosed)?;
        Ok(self.output.borrow_and_update().clone())
    }
}

impl<T> Drop for DebounceTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_emits_once_with_last_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), ms(500));

        debouncer.push("a".to_string(), t0);
        debouncer.push("b".to_string(), t0 + ms(100));
        debouncer.push("c".to_string(), t0 + ms(200));

        let mut emissions = Vec::new();
        for step in 0..=100 {
            let now = t0 + ms(step * 10);
            if let Some(value) = debouncer.poll(now) {
                emissions.push((step * 10, value));
            }
        }

        assert_eq!(emissions, vec![(700, "c".to_string())]);
    }

    #[test]
    fn test_initial_value_visible_without_delay() {
        let debouncer = Debouncer::new(7, ms(500));
        assert_eq!(*debouncer.committed(), 7);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_pending_and_deadline_track_latest_input() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(0, ms(500));

        debouncer.push(1, t0);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(500)));
        debouncer.push(2, t0 + ms(300));
        assert_eq!(debouncer.pending(), Some(&2));
        assert_eq!(debouncer.deadline(), Some(t0 + ms(800)));
        assert_eq!(*debouncer.committed(), 0);

        // The first deadline has passed but it was cancelled.
        assert_eq!(debouncer.poll(t0 + ms(600)), None);
        assert_eq!(debouncer.poll(t0 + ms(800)), Some(2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_returning_to_committed_value_does_not_emit() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), ms(500));

        debouncer.push("k".to_string(), t0);
        debouncer.push(String::new(), t0 + ms(50));

        assert_eq!(debouncer.poll(t0 + ms(1_000)), None);
        assert_eq!(debouncer.committed(), "");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel_suppresses_pending_and_future_input() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(0, ms(500));

        debouncer.push(1, t0);
        debouncer.cancel();
        assert_eq!(debouncer.poll(t0 + ms(1_000)), None);

        debouncer.push(2, t0 + ms(1_000));
        assert_eq!(debouncer.poll(t0 + ms(5_000)), None);
        assert!(debouncer.is_torn_down());
        assert_eq!(*debouncer.committed(), 0);
    }

    #[test]
    fn test_zero_delay_commits_on_next_poll() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(0, Duration::ZERO);
        debouncer.push(5, t0);
        assert_eq!(debouncer.poll(t0), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_emits_once_after_quiet_period() {
        let start = tokio::time::Instant::now();
        let task = DebounceTask::spawn(String::new(), ms(500));
        let mut rx = task.subscribe();

        task.push("a".to_string()).unwrap();
        tokio::time::sleep(ms(100)).await;
        task.push("b".to_string()).unwrap();
        tokio::time::sleep(ms(100)).await;
        task.push("c".to_string()).unwrap();

        tokio::time::sleep(ms(499)).await;
        assert!(!rx.has_changed().unwrap());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "c");
        let elapsed = start.elapsed();
        assert!(elapsed >= ms(700) && elapsed < ms(750), "elapsed {elapsed:?}");

        tokio::time::sleep(ms(5_000)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(task.current(), "c");
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_drop_discards_pending_value() {
        let task = DebounceTask::spawn(0u32, ms(500));
        let mut rx = task.subscribe();

        task.push(9).unwrap();
        tokio::time::sleep(ms(10)).await;
        drop(task);

        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), 0);
    }
}
