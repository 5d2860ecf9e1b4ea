//! API Module
//!
//! This module handles the backend calls the page makes:
//! - Movie data: `GET <movie_base><id>/lite/` and `GET <movie_base><id>/`
//! - Ratings: `POST`/`DELETE <eval_base><id>/` with a `{"score": ...}` body
//!
//! `MovieApi` is the seam card factories, modals, and the rating manager
//! depend on; `HttpMovieApi` is the reqwest implementation.

mod client;
mod http;

#[cfg(test)]
pub(crate) mod fake;


pub use client::{ApiError, MovieApi};
pub use http::{HttpMovieApi, decode_payload};
