use serde::{Deserialize, Serialize};
use std::fmt;

/// Movie identifier as used in every backend URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id)
    }
}

/// Lightweight movie payload served by `<movie_base>/<id>/lite/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieLite {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_kr: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub poster: String,
}

/// Full movie payload served by `<movie_base>/<id>/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_kr: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub imdb_score: Option<f64>,
    #[serde(default)]
    pub tmdb_score: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub similar_items: Vec<MovieId>,
}

/// A rating the user already submitted (rating record page)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub movie: MovieId,
    pub score: f32,
}

/// Response of the rating endpoint after a create, update or removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAck {
    #[serde(default)]
    pub movie: Option<MovieId>,
    /// `None` after a removal
    #[serde(default)]
    pub score: Option<f32>,
    pub rating_count: u32,
}

/// A labelled group of recommended movies, rendered as one carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationGroup {
    pub label: Vec<String>,
    pub items: Vec<MovieId>,
}

/// Seed data for one page, as read by the pre-render binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageSeed {
    Evaluate { movies: Vec<MovieId> },
    RatingRecord { records: Vec<RatingRecord> },
    Home { groups: Vec<RecommendationGroup> },
}
