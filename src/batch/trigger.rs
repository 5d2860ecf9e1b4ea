//! Batch Trigger Module
//!
//! This module decides which UI events fire a loader and keeps the registry
//! of bound loaders.
//!
//! # Trigger Bindings
//! - **Scroll**: The viewport bottom is within `offset_px` of the document bottom
//! - **NextArrow**: The right arrow of a given carousel was clicked
//! - **Detached**: Nothing fires the loader; only its initial batch is rendered
//!
//! The registry is an explicit object handed to setup code through the page
//! context. A loader binds itself when it still has items after its initial
//! batch and unbinds itself when its queue runs dry.

use crate::dom::ScrollDirection;
use crate::types::MovieId;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// A user interaction delivered to the page
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Window scrolled; all values in pixels
    Scroll {
        scroll_top: u32,
        viewport_height: u32,
        document_height: u32,
    },
    /// Arrow of an arrowed carousel clicked (`container` is the inner selector)
    ArrowClick {
        container: String,
        direction: ScrollDirection,
    },
    /// A rendered unit entered the viewport
    Intersect { unit_id: String },
    /// A clickable card was clicked; `in_modal` when inside a similar-items list
    CardClick { movie_id: MovieId, in_modal: bool },
    /// "Read more" pressed in a detail modal
    ReadMore { movie_id: MovieId },
    /// "Similar movies" pressed in a detail modal
    ShowSimilar { movie_id: MovieId },
    /// Detail modal closed
    DismissModal { movie_id: MovieId },
    /// Star rating changed; 0 clears the rating
    Rate { movie_id: MovieId, score: f32 },
}

/// The event source a loader listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerBinding {
    Scroll { offset_px: u32 },
    NextArrow { container: String },
    Detached,
}

impl TriggerBinding {
    /// Whether `event` fires a loader bound this way
    pub fn matches(&self, event: &UiEvent) -> bool {
        match (self, event) {
            (
                TriggerBinding::Scroll { offset_px },
                UiEvent::Scroll {
                    scroll_top,
                    viewport_height,
                    document_height,
                },
            ) => {
                let reached = u64::from(*scroll_top)
                    + u64::from(*viewport_height)
                    + u64::from(*offset_px);
                u64::from(*document_height) <= reached
            }
            (
                TriggerBinding::NextArrow { container },
                UiEvent::ArrowClick {
                    container: clicked,
                    direction: ScrollDirection::Right,
                },
            ) => container == clicked,
            _ => false,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, TriggerBinding::Detached)
    }

    /// An event that fires this binding: a viewport resting at the bottom of
    /// the page, or a right-arrow click on the bound container
    pub fn firing_event(&self) -> Option<UiEvent> {
        match self {
            TriggerBinding::Scroll { .. } => Some(UiEvent::Scroll {
                scroll_top: 0,
                viewport_height: 1080,
                document_height: 1080,
            }),
            TriggerBinding::NextArrow { container } => Some(UiEvent::ArrowClick {
                container: container.clone(),
                direction: ScrollDirection::Right,
            }),
            TriggerBinding::Detached => None,
        }
    }
}

/// Something the registry can fire
#[async_trait]
pub trait TriggerListener: Send + Sync {
    async fn on_trigger(&self);
}

/// Identifier of one binding in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    binding: TriggerBinding,
    listener: Arc<dyn TriggerListener>,
}

/// Registry of bound listeners
///
/// Listeners are fired in binding order. The internal lock is released before
/// any listener runs, so a listener may bind or unbind during dispatch.
#[derive(Default)]
pub struct EventRegistry {
    next_id: AtomicU64,
    registrations: Mutex<Vec<Registration>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `listener` to events matching `binding`
    pub fn bind(&self, binding: TriggerBinding, listener: Arc<dyn TriggerListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        trace!(?id, ?binding, "binding listener");
        self.lock().push(Registration {
            id,
            binding,
            listener,
        });
        id
    }

    /// Remove a binding
    ///
    /// # Returns
    /// `true` if the binding existed
    pub fn unbind(&self, id: ListenerId) -> bool {
        let mut registrations = self.lock();
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        trace!(?id, "unbinding listener");
        registrations.len() != before
    }

    pub fn is_bound(&self, id: ListenerId) -> bool {
        self.lock().iter().any(|registration| registration.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Bindings currently registered, in binding order
    pub fn bindings(&self) -> Vec<TriggerBinding> {
        self.lock()
            .iter()
            .map(|registration| registration.binding.clone())
            .collect()
    }

    /// Fire every listener whose binding matches `event`
    ///
    /// # Returns
    /// Number of listeners fired
    pub async fn dispatch(&self, event: &UiEvent) -> usize {
        let matched: Vec<Arc<dyn TriggerListener>> = self
            .lock()
            .iter()
            .filter(|registration| registration.binding.matches(event))
            .map(|registration| registration.listener.clone())
            .collect();

        for listener in &matched {
            listener.on_trigger().await;
        }
        matched.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Registration>> {
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
