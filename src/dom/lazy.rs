//! Lazy Image Module
//!
//! Cards are rendered with a pending image marker. The first time an observed
//! unit intersects the viewport the marker is removed and the unit is no
//! longer observed. Without intersection support cards are rendered without
//! the marker and nothing is observed.

use super::document::Document;
use std::collections::BTreeSet;
use tracing::debug;

/// Set of units waiting for their first intersection
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    enabled: bool,
    observed: BTreeSet<String>,
}

impl LazyImages {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_observed(&self, unit_id: &str) -> bool {
        self.observed.contains(unit_id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

impl Document {
    /// Turn intersection observing on or off
    pub fn set_lazy_images(&mut self, enabled: bool) {
        let lazy = self.lazy_mut();
        lazy.enabled = enabled;
        if !enabled {
            lazy.observed.clear();
        }
    }

    /// Start observing a rendered unit; no-op when lazy images are disabled
    pub fn observe(&mut self, unit_id: &str) {
        let lazy = self.lazy_mut();
        if lazy.enabled {
            lazy.observed.insert(unit_id.to_string());
        }
    }

    /// Handle a viewport intersection of `unit_id`
    ///
    /// # Returns
    /// `true` if a pending marker was removed
    pub fn intersect(&mut self, unit_id: &str) -> bool {
        if !self.lazy_mut().observed.remove(unit_id) {
            return false;
        }
        let revealed = self
            .unit_mut(unit_id)
            .map(|unit| unit.reveal_image())
            .unwrap_or(false);
        debug!(unit_id, revealed, "unit intersected viewport");
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardView;
    use crate::dom::Unit;
    use crate::types::MovieId;

    fn lazy_unit(id: &str) -> Unit {
        let view = CardView {
            card_id: id.to_string(),
            movie_id: 1,
            title_kr: String::new(),
            release_year: String::new(),
            poster: String::new(),
            rating_id: "rating-1".to_string(),
            lazy: true,
            stars: None,
        };
        Unit::card(id, MovieId(1), "card.simple", view)
    }

    #[test]
    fn test_intersection_is_one_shot() {
        let mut document = Document::with_containers(["#c"]);
        document.set_lazy_images(true);
        document.append("#c", lazy_unit("u1")).unwrap();
        document.observe("u1");

        assert!(document.intersect("u1"));
        assert!(!document.unit("u1").unwrap().has_pending_image());
        assert!(!document.lazy().is_observed("u1"));
        assert!(!document.intersect("u1"));
    }

    #[test]
    fn test_unobserved_units_keep_marker() {
        let mut document = Document::with_containers(["#c"]);
        document.append("#c", lazy_unit("u1")).unwrap();
        // disabled by default
        document.observe("u1");

        assert!(!document.intersect("u1"));
        assert!(document.unit("u1").unwrap().has_pending_image());
    }
}
