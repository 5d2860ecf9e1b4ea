//! Tokio Timer Driver
//!
//! Runs each callback on a spawned task after a real `tokio::time::sleep`.

use super::timer::{TimerCallback, TimerHandle, Timers};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Timer driver backed by the tokio runtime
///
/// Must be used from within a tokio runtime.
#[derive(Default)]
pub struct TokioTimers {
    next_id: AtomicU64,
}

impl TokioTimers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Timers for TokioTimers {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let watched = handle.clone();

        tokio::spawn(async move {
            sleep(delay).await;
            if !watched.is_cancelled() {
                callback();
            }
        });

        handle
    }

    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
