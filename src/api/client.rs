//! Movie API trait and error types

use crate::types::{MovieDetail, MovieId, MovieLite, RatingAck};
use async_trait::async_trait;
use thiserror::Error;

/// Backend the page talks to
///
/// Every call is independent; a failure only affects the unit that made it.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Title, year, and poster for a card
    async fn movie_lite(&self, id: MovieId) -> Result<MovieLite, ApiError>;

    /// Full detail for the modal, including similar movie ids
    async fn movie_detail(&self, id: MovieId) -> Result<MovieDetail, ApiError>;

    /// Create or update the user's rating
    async fn save_rating(&self, id: MovieId, score: f32) -> Result<RatingAck, ApiError>;

    /// Remove the user's rating
    async fn remove_rating(&self, id: MovieId) -> Result<RatingAck, ApiError>;
}

/// Errors that can occur while calling the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the backend answered with a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
