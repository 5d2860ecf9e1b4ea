//! Detail Modal Module
//!
//! Full movie details shown in a modal dialog. The modal is fetched and
//! rendered once per movie, then reused. Similar movies are loaded on demand
//! into a container inside the modal.

mod detail;

#[cfg(test)]
mod tests;

pub use detail::{DetailModal, score_percent, split_overview};
