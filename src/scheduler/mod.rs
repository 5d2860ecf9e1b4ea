//! Timer Scheduling Module
//!
//! This module provides scheduled callbacks with explicit cancellation handles.
//! Loaders use it for their cooldown window instead of ambient timers:
//! - ManualTimers: Virtual clock advanced by the caller (deterministic tests, headless runs)
//! - TokioTimers: Real delays on the tokio runtime
//!
//! Both drivers honour `TimerHandle::cancel` up to the moment the callback runs.

mod timer;
mod manual;
mod runtime;

#[cfg(test)]
mod tests;

pub use timer::{TimerCallback, TimerHandle, Timers};
pub use manual::ManualTimers;
pub use runtime::TokioTimers;
