//! Item Queue Module
//!
//! This module implements the pending-item queue owned by a loader.
//! Items are consumed strictly from the front and never reordered.

use std::collections::VecDeque;

/// Queue of items waiting to be rendered
///
/// Uses VecDeque for efficient removal from the front.
/// Owned by exactly one loader, so it needs no lock of its own.
#[derive(Debug, Clone)]
pub struct ItemQueue<T> {
    items: VecDeque<T>,
}

impl<T> ItemQueue<T> {
    /// Creates a new empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Replace the queue contents, keeping the given order
    pub fn reset(&mut self, items: impl IntoIterator<Item = T>) {
        self.items = items.into_iter().collect();
    }

    /// Remove the front item
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ItemQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
