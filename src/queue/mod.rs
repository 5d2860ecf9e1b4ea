//! Item Queue Module
//!
//! This module holds the pending items of a loader:
//! movie identifiers, rating records, or recommendation groups
//! waiting to be rendered.

mod item_queue;

pub use item_queue::ItemQueue;
