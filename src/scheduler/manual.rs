//! Manual Timer Driver
//!
//! A virtual clock that only moves when `advance` is called. Callbacks become
//! due in deadline order (ties broken by scheduling order) and run outside the
//! internal lock, so a callback may schedule further timers.

use super::timer::{TimerCallback, TimerHandle, Timers};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::trace;

struct PendingTimer {
    handle: TimerHandle,
    callback: TimerCallback,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so iteration order is firing order
    pending: BTreeMap<(Duration, u64), PendingTimer>,
}

/// Deterministic timer driver with a caller-controlled clock
#[derive(Default)]
pub struct ManualTimers {
    state: Mutex<ClockState>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of scheduled callbacks that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.lock()
            .pending
            .values()
            .filter(|timer| !timer.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward and run every callback that became due
    ///
    /// Callbacks scheduled by a running callback fire in the same call if
    /// their deadline is within the advanced window.
    ///
    /// # Returns
    /// Number of callbacks that ran
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            // Pop the next due timer while holding the lock, run it without
            let next = {
                let mut state = self.lock();
                let due = state
                    .pending
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(deadline, _)| *deadline <= target);
                match due {
                    Some(key) => {
                        state.now = key.0;
                        state.pending.remove(&key)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            let Some(timer) = next else { break };
            if timer.handle.is_cancelled() {
                trace!(timer_id = timer.handle.id(), "skipping cancelled timer");
                continue;
            }
            (timer.callback)();
            fired += 1;
        }

        fired
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ClockState> {
        // A poisoned clock only means a callback panicked; the map is still consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Timers for ManualTimers {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;

        let handle = TimerHandle::new(id);
        let deadline = state.now + delay;
        state.pending.insert(
            (deadline, id),
            PendingTimer {
                handle: handle.clone(),
                callback,
            },
        );
        handle
    }

    /// Advances the virtual clock instead of waiting
    async fn sleep(&self, delay: Duration) {
        self.advance(delay);
    }
}
