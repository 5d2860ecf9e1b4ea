//! Card Kinds
//!
//! Every card variant is described by one `CardLayout` entry in a fixed table:
//! its template, its element id, and an optional hook run after the card is
//! in the document. Adding a variant means adding a discriminant and a row.

use super::factory::CardRequest;
use super::templates::{POSTER_CARD, SIMPLE_CARD, STAR_CARD};
use crate::dom::Document;
use crate::ratings::StarWidget;
use crate::types::MovieId;

/// Card variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// Poster, title, and a star rating widget
    Star,
    /// Clickable poster only (similar movies in a modal)
    Poster,
    /// Clickable poster with title and a lazily revealed image (carousels)
    Simple,
}

/// A card that has just been appended to the document
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub card_id: String,
    pub request: CardRequest,
}

/// Hook run with the document still locked, right after the append
pub type PostRenderHook = fn(&mut Document, &RenderedCard);

/// Static description of one card variant
pub struct CardLayout {
    pub template: &'static str,
    pub id_prefix: &'static str,
    pub post_render: Option<PostRenderHook>,
}

static CARD_LAYOUTS: [CardLayout; 3] = [
    CardLayout {
        template: STAR_CARD,
        id_prefix: "movie-card-star",
        post_render: Some(activate_star_rating),
    },
    CardLayout {
        template: POSTER_CARD,
        id_prefix: "movie-card-poster",
        post_render: None,
    },
    CardLayout {
        template: SIMPLE_CARD,
        id_prefix: "movie-card-simple-",
        post_render: Some(observe_for_lazy_image),
    },
];

impl CardKind {
    pub fn layout(self) -> &'static CardLayout {
        let index = match self {
            CardKind::Star => 0,
            CardKind::Poster => 1,
            CardKind::Simple => 2,
        };
        &CARD_LAYOUTS[index]
    }

    /// Element id of this variant's card for `movie_id`
    pub fn card_id(self, movie_id: MovieId) -> String {
        format!("{}{}", self.layout().id_prefix, movie_id)
    }

    /// Whether the card is rendered with a pending image marker
    pub fn uses_lazy_image(self) -> bool {
        self == CardKind::Simple
    }
}

fn activate_star_rating(document: &mut Document, card: &RenderedCard) {
    document.attach_widget(StarWidget::new(
        card.request.movie_id,
        card.request.initial_score,
        card.request.palette,
    ));
}

fn observe_for_lazy_image(document: &mut Document, card: &RenderedCard) {
    document.observe(&card.card_id);
}
