//! HTTP Movie API Module
//!
//! reqwest implementation of `MovieApi`. The backend renders its JSON twice,
//! so a body may be either the document itself or a JSON string holding it;
//! `decode_payload` accepts both.

use super::client::{ApiError, MovieApi};
use crate::config::ApiConfig;
use crate::types::{MovieDetail, MovieId, MovieLite, RatingAck};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Movie API over HTTP
pub struct HttpMovieApi {
    client: Client,
    movie_base: String,
    eval_base: String,
    csrf_token: String,
}

impl HttpMovieApi {
    /// Creates a new client from the API configuration
    ///
    /// # Arguments
    /// * `config` - Base URLs, CSRF token, and request timeout
    ///
    /// # Returns
    /// An error if a base URL does not parse or the HTTP client can't be built
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            movie_base: normalize_base(&config.movie_base_url)?,
            eval_base: normalize_base(&config.eval_base_url)?,
            csrf_token: config.csrf_token.clone(),
        })
    }

    pub fn lite_url(&self, id: MovieId) -> String {
        format!("{}{}/lite/", self.movie_base, id)
    }

    pub fn detail_url(&self, id: MovieId) -> String {
        format!("{}{}/", self.movie_base, id)
    }

    pub fn rating_url(&self, id: MovieId) -> String {
        format!("{}{}/", self.eval_base, id)
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::read(response, url).await
    }

    async fn send_score<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        score: f32,
    ) -> Result<T, ApiError> {
        debug!(%url, %method, score, "submitting rating");
        let response = self
            .client
            .request(method, &url)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(&json!({ "score": score }))
            .send()
            .await?;
        Self::read(response, url).await
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response, url: String) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        decode_payload(&body)
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn movie_lite(&self, id: MovieId) -> Result<MovieLite, ApiError> {
        self.get(self.lite_url(id)).await
    }

    async fn movie_detail(&self, id: MovieId) -> Result<MovieDetail, ApiError> {
        self.get(self.detail_url(id)).await
    }

    async fn save_rating(&self, id: MovieId, score: f32) -> Result<RatingAck, ApiError> {
        self.send_score(Method::POST, self.rating_url(id), score).await
    }

    async fn remove_rating(&self, id: MovieId) -> Result<RatingAck, ApiError> {
        self.send_score(Method::DELETE, self.rating_url(id), 0.0).await
    }
}

/// Decode a response body that may be JSON or JSON wrapped in a JSON string
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::String(inner) => Ok(serde_json::from_str(&inner)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Validate a base URL and make sure it ends with a slash
fn normalize_base(base: &str) -> Result<String, ApiError> {
    Url::parse(base).map_err(|_| ApiError::InvalidUrl(base.to_string()))?;
    if base.ends_with('/') {
        Ok(base.to_string())
    } else {
        Ok(format!("{base}/"))
    }
}
