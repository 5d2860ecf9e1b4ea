//! Rating Module
//!
//! This module handles star ratings on movie cards:
//! - StarWidget: Per-card widget state (current score and colour palette)
//! - RatingManager: Submits ratings and updates the rating counter

mod manager;
mod widget;


pub use manager::RatingManager;
pub use widget::{StarPalette, StarWidget};
