//! Timer Handle Module
//!
//! Defines the `Timers` seam and the cancellation handle returned for every
//! scheduled callback.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Callback run once when its delay elapses
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a callback after a delay
///
/// Implementations must never run a callback whose handle was cancelled,
/// and must run each callback at most once.
#[async_trait]
pub trait Timers: Send + Sync {
    /// Schedule `callback` to run once after `delay`
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Let `delay` pass on this driver's clock
    async fn sleep(&self, delay: Duration);
}

/// Cancellation handle for one scheduled callback
///
/// Cloning the handle shares the same cancellation flag.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Prevent the callback from running if it has not run yet
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
