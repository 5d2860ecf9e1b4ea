//! Batch Loader Module
//!
//! This module implements the loader that renders a queue of items
//! incrementally. It renders an initial batch right away, then one batch per
//! accepted trigger event until the queue is empty.
//!
//! # Lifecycle
//! 1. `initialize` fills the queue and drains `initial_batch_size` items
//! 2. If items remain, the loader binds its trigger in the event registry
//! 3. Each accepted trigger drains `batch_size` items and starts a cooldown
//! 4. Triggers during the cooldown (or with an empty queue) are ignored
//! 5. The drain that empties the queue unbinds the trigger; the loader is done
//!
//! # Skip and Backfill
//! A unit that fails to materialize is skipped and one more item is pulled
//! from the queue in its place. The number of attempts is bounded by the
//! queue length.

use super::factory::UnitFactory;
use super::trigger::{EventRegistry, ListenerId, TriggerBinding, TriggerListener};
use crate::config::LoaderConfig;
use crate::queue::ItemQueue;
use crate::scheduler::{TimerHandle, Timers};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Observable state of a loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Items remain and the next trigger will drain a batch
    Accepting,
    /// Items remain but a drain happened less than one cooldown ago
    Cooldown,
    /// Queue empty, trigger released; terminal
    Done,
}

/// Counters accumulated over the loader's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// Drain operations run (initial batch included)
    pub drains: usize,
    /// Units rendered successfully
    pub rendered: usize,
    /// Units skipped because they failed
    pub failed: usize,
}

/// Mutable part of a loader, guarded by one async mutex
struct LoaderCore<T> {
    queue: ItemQueue<T>,
    listener: Option<ListenerId>,
    cooldown: Option<TimerHandle>,
    stats: DrainStats,
}

struct LoaderInner<T> {
    name: String,
    settings: LoaderConfig,
    binding: TriggerBinding,
    factory: Arc<dyn UnitFactory<T>>,
    timers: Arc<dyn Timers>,
    events: Arc<EventRegistry>,
    /// Cleared when a trigger is accepted, set again by the cooldown timer
    ready: Arc<AtomicBool>,
    core: Mutex<LoaderCore<T>>,
}

/// Incremental loader for items of type `T`
///
/// Cloning shares the same loader. While bound, the event registry holds a
/// clone, which keeps nested loaders alive until their queue is exhausted.
pub struct BatchLoader<T> {
    inner: Arc<LoaderInner<T>>,
}

impl<T> Clone for BatchLoader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for BatchLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchLoader")
            .field("name", &self.inner.name)
            .field("binding", &self.inner.binding)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> BatchLoader<T> {
    /// Creates a new loader with an empty queue
    ///
    /// # Arguments
    /// * `name` - Label used in logs
    /// * `settings` - Batch sizes and cooldown
    /// * `binding` - Trigger bound once the initial batch leaves items behind
    /// * `factory` - Materializes each drained item
    /// * `timers` - Driver for the cooldown timer
    /// * `events` - Registry the trigger is bound in
    pub fn new(
        name: impl Into<String>,
        settings: LoaderConfig,
        binding: TriggerBinding,
        factory: Arc<dyn UnitFactory<T>>,
        timers: Arc<dyn Timers>,
        events: Arc<EventRegistry>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                name: name.into(),
                settings,
                binding,
                factory,
                timers,
                events,
                ready: Arc::new(AtomicBool::new(true)),
                core: Mutex::new(LoaderCore {
                    queue: ItemQueue::new(),
                    listener: None,
                    cooldown: None,
                    stats: DrainStats::default(),
                }),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Fill the queue, render the initial batch, and bind the trigger if items remain
    ///
    /// Returns once the initial batch has been materialized.
    pub async fn initialize(&self, items: impl IntoIterator<Item = T>) {
        let mut core = self.inner.core.lock().await;
        core.queue.reset(items);
        info!(
            loader = %self.inner.name,
            queued = core.queue.len(),
            initial_batch = self.inner.settings.initial_batch_size,
            "initializing loader"
        );

        self.drain(&mut core, self.inner.settings.initial_batch_size)
            .await;

        if core.queue.is_empty() || core.listener.is_some() || !self.can_drain() {
            return;
        }
        let listener: Arc<dyn TriggerListener> = Arc::new(self.clone());
        let id = self.inner.events.bind(self.inner.binding.clone(), listener);
        debug!(loader = %self.inner.name, binding = ?self.inner.binding, "trigger bound");
        core.listener = Some(id);
    }

    /// Handle one trigger event
    ///
    /// Drains one batch only if the loader is ready and has items left;
    /// otherwise the event is dropped. An accepted trigger starts a fixed
    /// cooldown that later triggers do not extend.
    ///
    /// # Returns
    /// `true` if a batch was drained
    pub async fn trigger(&self) -> bool {
        if !self.can_drain() {
            return false;
        }
        let mut core = self.inner.core.lock().await;
        if !self.inner.ready.load(Ordering::SeqCst) || core.queue.is_empty() {
            debug!(loader = %self.inner.name, "trigger ignored");
            return false;
        }

        self.inner.ready.store(false, Ordering::SeqCst);
        let ready = self.inner.ready.clone();
        core.cooldown = Some(self.inner.timers.schedule(
            self.inner.settings.cooldown(),
            Box::new(move || ready.store(true, Ordering::SeqCst)),
        ));

        self.drain(&mut core, self.inner.settings.batch_size).await;
        true
    }

    /// Current state of the loader
    ///
    /// A loader that can never drain after its initial batch is `Done` even
    /// if items are left in its queue.
    pub async fn state(&self) -> LoaderState {
        let core = self.inner.core.lock().await;
        if core.queue.is_empty() || !self.can_drain() {
            LoaderState::Done
        } else if self.inner.ready.load(Ordering::SeqCst) {
            LoaderState::Accepting
        } else {
            LoaderState::Cooldown
        }
    }

    /// Items still waiting in the queue
    pub async fn remaining(&self) -> usize {
        self.inner.core.lock().await.queue.len()
    }

    pub async fn stats(&self) -> DrainStats {
        self.inner.core.lock().await.stats
    }

    /// Whether the trigger is currently bound in the registry
    pub async fn is_bound(&self) -> bool {
        let core = self.inner.core.lock().await;
        core.listener
            .map(|id| self.inner.events.is_bound(id))
            .unwrap_or(false)
    }

    /// Whether triggers can ever drain anything
    fn can_drain(&self) -> bool {
        self.inner.settings.batch_size > 0 && !self.inner.binding.is_detached()
    }

    /// Remove up to `size` items from the front and materialize them
    ///
    /// A failed unit is replaced by one more item from the queue. When the
    /// queue ends up empty the loader releases its trigger.
    async fn drain(&self, core: &mut LoaderCore<T>, size: usize) {
        let mut budget = size;
        let mut rendered = 0;
        let mut failed = 0;

        while budget > 0 {
            let Some(item) = core.queue.pop_front() else {
                break;
            };
            budget -= 1;

            match self.inner.factory.materialize(item).await {
                Ok(()) => rendered += 1,
                Err(e) => {
                    // Backfill: pull one replacement for the skipped unit
                    if e.is_not_found() {
                        debug!(loader = %self.inner.name, error = %e, "unit no longer exists, backfilling");
                    } else {
                        warn!(loader = %self.inner.name, error = %e, "unit failed, backfilling");
                    }
                    failed += 1;
                    budget += 1;
                }
            }
        }

        core.stats.drains += 1;
        core.stats.rendered += rendered;
        core.stats.failed += failed;
        debug!(
            loader = %self.inner.name,
            requested = size,
            rendered,
            failed,
            remaining = core.queue.len(),
            "batch drained"
        );

        if core.queue.is_empty() {
            self.finish(core);
        }
    }

    /// Enter the terminal state: release the trigger and any pending cooldown
    fn finish(&self, core: &mut LoaderCore<T>) {
        if let Some(id) = core.listener.take() {
            self.inner.events.unbind(id);
        }
        if let Some(cooldown) = core.cooldown.take() {
            cooldown.cancel();
        }
        info!(
            loader = %self.inner.name,
            rendered = core.stats.rendered,
            failed = core.stats.failed,
            "loader done"
        );
    }
}

#[async_trait]
impl<T: Send + 'static> TriggerListener for BatchLoader<T> {
    async fn on_trigger(&self) {
        self.trigger().await;
    }
}
