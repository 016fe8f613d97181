//! TMDB HTTP client
//!
//! Handles communication with The Movie Database v3 API.
//! See: https://developer.themoviedb.org/docs
//!
//! The client does no throttling of its own; callers go through
//! [`crate::enrichment::CatalogMatcher`], which spaces requests out.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{LookupError, MovieCandidate};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl TmdbClient {
    /// Create a new client with the given API key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            api_key,
            http_client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search movies by title, optionally narrowed to a release year.
    ///
    /// Candidates come back in TMDB relevance order.
    pub async fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<MovieCandidate>, LookupError> {
        let url = self.search_url(title, year);
        tracing::debug!(title, ?year, "TMDB search");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<dto::ApiError>(&body)
                .map(|e| e.status_message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        Ok(adapter::to_candidates(body))
    }

    fn search_url(&self, title: &str, year: Option<i32>) -> String {
        let mut url = format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title)
        );
        if let Some(year) = year {
            url.push_str(&format!("&year={year}"));
        }
        url
    }
}
