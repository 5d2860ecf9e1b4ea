//! Error types shared across modules
//!
//! Per-unit failures (`CardError`) are recovered by the loader that produced
//! the unit. Page-level failures (`PageError`) are reported to the caller of a
//! setup function or event handler and never affect other units.

use crate::api::ApiError;
use crate::dom::DomError;
use thiserror::Error;

/// Failure to materialize one unit (card or carousel)
#[derive(Debug, Error)]
pub enum CardError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),

    #[error("template failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl CardError {
    /// Whether the unit's movie is gone from the backend
    pub fn is_not_found(&self) -> bool {
        matches!(self, CardError::Fetch(e) if e.is_not_found())
    }
}

/// Failure of a page setup step or event handler
#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),

    #[error("template failed: {0}")]
    Render(#[from] handlebars::RenderError),
}
