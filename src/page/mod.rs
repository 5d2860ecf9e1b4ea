//! Page Module
//!
//! Entry points of a page:
//! - Setup: One function per page kind, each wiring a loader to the main container
//! - Page: Routes UI events to loaders, the detail modal, and the rating manager,
//!   and drives every bound trigger to completion for a pre-render

mod handler;
mod setup;


pub use handler::{LoadReport, Page};
pub use setup::{evaluate, home, rating_record};
