//! Batch Loading Module
//!
//! This module implements incremental rendering of queued items:
//! - BatchLoader: Drains its queue in bounded batches on trigger events
//! - TriggerBinding: Which UI event fires a loader (scroll threshold, next arrow)
//! - EventRegistry: Explicit registry of bound loaders, owned by the page context
//! - UnitFactory: Materializes one queued item into the document

mod factory;
mod loader;
pub mod trigger;


pub use factory::UnitFactory;
pub use loader::{BatchLoader, DrainStats, LoaderState};
pub use trigger::{EventRegistry, ListenerId, TriggerBinding, TriggerListener, UiEvent};
