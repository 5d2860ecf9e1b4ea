//! This crate renders movie listing pages headlessly: cards are loaded in
//! bounded batches as the user scrolls or clicks carousel arrows, detail
//! modals are fetched on demand, and star ratings are sent to the backend.

pub mod types; // Movie payloads, rating records, and page seeds.
pub mod config; // Loads loader profiles, endpoints, and selectors from TOML.
pub mod error; // Card-level and page-level error types.
pub mod queue; // FIFO queue drained by the loaders.
pub mod scheduler; // Cancellable one-shot timers (tokio-backed and simulated).
pub mod batch; // Batch loaders, trigger bindings, and the event registry.
pub mod dom; // In-memory document: containers, units, modals, lazy images.
pub mod api; // Backend client for movie data and ratings.
pub mod cards; // Card kinds, templates, and unit factories.
pub mod ratings; // Star widgets and rating submission.
pub mod modal; // Detail modal with overview toggle and similar movies.
pub mod context; // Shared handles passed to setup code and handlers.
pub mod page; // Page setup functions and UI event routing.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use context::PageContext;
pub use page::Page;
