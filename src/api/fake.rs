//! In-memory `MovieApi` used by unit tests

use super::client::{ApiError, MovieApi};
use crate::types::{MovieDetail, MovieId, MovieLite, RatingAck};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A call the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Lite(MovieId),
    Detail(MovieId),
    SaveRating(MovieId, f32),
    RemoveRating(MovieId),
}

#[derive(Default)]
pub struct FakeMovieApi {
    movies: HashMap<MovieId, MovieDetail>,
    failing: HashSet<MovieId>,
    ratings: Mutex<HashMap<MovieId, f32>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeMovieApi {
    /// Fake that knows movies `ids`, each with a generated title
    pub fn with_movies(ids: impl IntoIterator<Item = u64>) -> Self {
        let mut api = Self::default();
        for id in ids {
            api.insert(movie(id));
        }
        api
    }

    pub fn insert(&mut self, detail: MovieDetail) {
        self.movies.insert(detail.id, detail);
    }

    /// Make every request for `id` fail with a 500
    pub fn failing(mut self, id: u64) -> Self {
        self.failing.insert(MovieId(id));
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn lookup(&self, id: MovieId) -> Result<&MovieDetail, ApiError> {
        if self.failing.contains(&id) {
            return Err(ApiError::Status {
                status: 500,
                url: format!("/movie/{id}/"),
            });
        }
        self.movies.get(&id).ok_or(ApiError::Status {
            status: 404,
            url: format!("/movie/{id}/"),
        })
    }
}

/// Detail payload with predictable fields
pub fn movie(id: u64) -> MovieDetail {
    MovieDetail {
        id: MovieId(id),
        title: format!("Movie {id}"),
        title_kr: format!("영화 {id}"),
        release_year: Some(2000 + id as i32),
        runtime: Some(100),
        imdb_score: Some(7.5),
        tmdb_score: Some(8.04),
        genres: vec!["Drama".to_string()],
        directors: vec!["Director".to_string()],
        actors: vec!["Actor A".to_string(), "Actor B".to_string()],
        countries: vec!["KR".to_string()],
        overview: "Short overview.".to_string(),
        poster: format!("/posters/{id}.jpg"),
        similar_items: Vec::new(),
    }
}

#[async_trait]
impl MovieApi for FakeMovieApi {
    async fn movie_lite(&self, id: MovieId) -> Result<MovieLite, ApiError> {
        self.record(ApiCall::Lite(id));
        let detail = self.lookup(id)?;
        Ok(MovieLite {
            id: detail.id,
            title: detail.title.clone(),
            title_kr: detail.title_kr.clone(),
            release_year: detail.release_year,
            poster: detail.poster.clone(),
        })
    }

    async fn movie_detail(&self, id: MovieId) -> Result<MovieDetail, ApiError> {
        self.record(ApiCall::Detail(id));
        self.lookup(id).cloned()
    }

    async fn save_rating(&self, id: MovieId, score: f32) -> Result<RatingAck, ApiError> {
        self.record(ApiCall::SaveRating(id, score));
        self.lookup(id)?;
        let mut ratings = self.ratings.lock().unwrap();
        ratings.insert(id, score);
        Ok(RatingAck {
            movie: Some(id),
            score: Some(score),
            rating_count: ratings.len() as u32,
        })
    }

    async fn remove_rating(&self, id: MovieId) -> Result<RatingAck, ApiError> {
        self.record(ApiCall::RemoveRating(id));
        let mut ratings = self.ratings.lock().unwrap();
        ratings.remove(&id);
        Ok(RatingAck {
            movie: Some(id),
            score: None,
            rating_count: ratings.len() as u32,
        })
    }
}
