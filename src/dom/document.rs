//! Document Module
//!
//! An in-memory stand-in for the page DOM. Loaders and cards only ever append
//! units to containers that already exist, so a missing container is reported
//! instead of silently created.

use super::lazy::LazyImages;
use crate::cards::CardView;
use crate::ratings::StarWidget;
use crate::types::MovieId;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by document mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("container {0} is not in the document")]
    MissingContainer(String),
    #[error("no modal rendered for movie {0}")]
    MissingModal(MovieId),
}

/// Direction of an arrow click on a carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// What a unit renders from
#[derive(Debug, Clone, PartialEq)]
pub enum UnitContent {
    /// Markup rendered once at creation (carousels)
    Markup(String),
    /// A card rendered from its view whenever the page is serialized
    Card {
        template: &'static str,
        view: CardView,
    },
}

/// One unit (card or carousel) inside a container
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: String,
    pub movie_id: Option<MovieId>,
    pub content: UnitContent,
}

impl Unit {
    pub fn markup(id: impl Into<String>, movie_id: Option<MovieId>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            movie_id,
            content: UnitContent::Markup(html.into()),
        }
    }

    pub fn card(id: impl Into<String>, movie_id: MovieId, template: &'static str, view: CardView) -> Self {
        Self {
            id: id.into(),
            movie_id: Some(movie_id),
            content: UnitContent::Card { template, view },
        }
    }

    /// Whether the unit still carries the pending image marker
    pub fn has_pending_image(&self) -> bool {
        matches!(&self.content, UnitContent::Card { view, .. } if view.lazy)
    }

    /// Clear the pending image marker
    ///
    /// # Returns
    /// `true` if the marker was set
    pub fn reveal_image(&mut self) -> bool {
        match &mut self.content {
            UnitContent::Card { view, .. } if view.lazy => {
                view.lazy = false;
                true
            }
            _ => false,
        }
    }
}

/// A container element that units are appended to
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub selector: String,
    pub units: Vec<Unit>,
    /// Horizontal scroll position in pages (arrowed carousels)
    pub scroll_page: usize,
}

impl Container {
    fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            units: Vec::new(),
            scroll_page: 0,
        }
    }

    /// Movie ids of the rendered cards, in render order
    pub fn movie_ids(&self) -> Vec<MovieId> {
        self.units.iter().filter_map(|unit| unit.movie_id).collect()
    }
}

/// Rendered detail modal and its toggle state
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub movie_id: MovieId,
    pub html: String,
    pub shown: bool,
    /// Whether the overview has a hidden tail behind "read more"
    pub has_read_more: bool,
    pub overview_expanded: bool,
    /// Selector of the similar-items container, if the movie has any
    pub similar_selector: Option<String>,
    pub similar_items: Vec<MovieId>,
    pub similar_expanded: bool,
    /// Set once the similar loader has been spawned
    pub similar_loaded: bool,
}

/// Rating counter and the note revealed once enough ratings exist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingPanel {
    /// Element showing the count, e.g. `#rating-count`
    pub count_selector: String,
    /// Element revealed at the unlock threshold, e.g. `#ready-note`
    pub note_selector: String,
    pub count: Option<u32>,
    pub ready_note_visible: bool,
}

impl RatingPanel {
    pub fn new(count_selector: impl Into<String>, note_selector: impl Into<String>) -> Self {
        Self {
            count_selector: count_selector.into(),
            note_selector: note_selector.into(),
            ..Self::default()
        }
    }
}

/// The whole page
#[derive(Debug, Default)]
pub struct Document {
    containers: BTreeMap<String, Container>,
    modals: BTreeMap<MovieId, ModalView>,
    widgets: BTreeMap<MovieId, StarWidget>,
    rating_panel: RatingPanel,
    lazy: LazyImages,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document that already contains the given containers
    pub fn with_containers<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document = Self::new();
        for selector in selectors {
            document.add_container(selector);
        }
        document
    }

    /// Add an empty container; an existing container is left untouched
    pub fn add_container(&mut self, selector: &str) {
        self.containers
            .entry(selector.to_string())
            .or_insert_with(|| Container::new(selector));
    }

    pub fn has_container(&self, selector: &str) -> bool {
        self.containers.contains_key(selector)
    }

    pub fn container(&self, selector: &str) -> Option<&Container> {
        self.containers.get(selector)
    }

    /// Append a unit to the end of a container
    pub fn append(&mut self, selector: &str, unit: Unit) -> Result<(), DomError> {
        let container = self
            .containers
            .get_mut(selector)
            .ok_or_else(|| DomError::MissingContainer(selector.to_string()))?;
        container.units.push(unit);
        Ok(())
    }

    /// Find a unit by id anywhere in the document
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.containers
            .values()
            .flat_map(|container| container.units.iter())
            .find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.containers
            .values_mut()
            .flat_map(|container| container.units.iter_mut())
            .find(|unit| unit.id == id)
    }

    /// Scroll an arrowed container by one page
    pub fn scroll_container(
        &mut self,
        selector: &str,
        direction: ScrollDirection,
    ) -> Result<usize, DomError> {
        let container = self
            .containers
            .get_mut(selector)
            .ok_or_else(|| DomError::MissingContainer(selector.to_string()))?;
        container.scroll_page = match direction {
            ScrollDirection::Left => container.scroll_page.saturating_sub(1),
            ScrollDirection::Right => container.scroll_page + 1,
        };
        Ok(container.scroll_page)
    }

    pub fn modal(&self, movie_id: MovieId) -> Option<&ModalView> {
        self.modals.get(&movie_id)
    }

    pub fn modal_mut(&mut self, movie_id: MovieId) -> Result<&mut ModalView, DomError> {
        self.modals
            .get_mut(&movie_id)
            .ok_or(DomError::MissingModal(movie_id))
    }

    /// Add a modal to the modal container, registering its similar container
    pub fn insert_modal(&mut self, modal: ModalView) {
        if let Some(selector) = &modal.similar_selector {
            self.add_container(selector);
        }
        self.modals.insert(modal.movie_id, modal);
    }

    /// Modals currently displayed
    pub fn shown_modals(&self) -> Vec<MovieId> {
        self.modals
            .values()
            .filter(|modal| modal.shown)
            .map(|modal| modal.movie_id)
            .collect()
    }

    pub fn widget(&self, movie_id: MovieId) -> Option<&StarWidget> {
        self.widgets.get(&movie_id)
    }

    pub fn widget_mut(&mut self, movie_id: MovieId) -> Option<&mut StarWidget> {
        self.widgets.get_mut(&movie_id)
    }

    pub fn attach_widget(&mut self, widget: StarWidget) {
        self.widgets.insert(widget.movie_id, widget);
    }

    pub fn rating_panel(&self) -> &RatingPanel {
        &self.rating_panel
    }

    pub fn rating_panel_mut(&mut self) -> &mut RatingPanel {
        &mut self.rating_panel
    }

    pub fn lazy(&self) -> &LazyImages {
        &self.lazy
    }

    pub fn lazy_mut(&mut self) -> &mut LazyImages {
        &mut self.lazy
    }

    pub fn set_rating_panel(&mut self, panel: RatingPanel) {
        self.rating_panel = panel;
    }

    /// Whether any card carries a star widget
    pub fn has_widgets(&self) -> bool {
        !self.widgets.is_empty()
    }

    /// Containers in selector order
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// Modals in movie id order
    pub fn modals(&self) -> impl Iterator<Item = &ModalView> {
        self.modals.values()
    }
}
