//! Star rating widget state

use crate::types::MovieId;

/// Colours of a star widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarPalette {
    /// Unrated movies on the evaluation page
    #[default]
    Standard,
    /// Movies that already carry a rating
    Alternate,
}

impl StarPalette {
    pub fn hover_color(self) -> &'static str {
        match self {
            StarPalette::Standard => "gold",
            StarPalette::Alternate => "coral",
        }
    }

    pub fn rated_color(self) -> &'static str {
        match self {
            StarPalette::Standard => "orange",
            StarPalette::Alternate => "tomato",
        }
    }
}

/// Rating widget attached to one card
#[derive(Debug, Clone, PartialEq)]
pub struct StarWidget {
    pub movie_id: MovieId,
    /// Element the widget is mounted in
    pub slot_id: String,
    /// Current score, 0 when unrated
    pub score: f32,
    pub palette: StarPalette,
}

impl StarWidget {
    pub fn new(movie_id: MovieId, score: f32, palette: StarPalette) -> Self {
        Self {
            movie_id,
            slot_id: format!("rating-{movie_id}"),
            score,
            palette,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.score > 0.0
    }
}
