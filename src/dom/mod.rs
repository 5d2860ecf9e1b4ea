//! Document Model Module
//!
//! This module holds the in-memory page the loaders render into:
//! - Document: Containers, detail modals, and the rating panel
//! - Unit: One rendered card (or carousel) appended to a container
//! - LazyImages: One-shot intersection trigger that clears the pending image marker

mod document;
mod lazy;

pub use document::{
    Container, DomError, Document, ModalView, RatingPanel, ScrollDirection, Unit, UnitContent,
};
pub use lazy::LazyImages;
