//! TMDB API Data Transfer Objects
//!
//! These types match what the TMDB `/search/movie` endpoint returns.
//! DO NOT use these types outside the tmdb module - convert to domain types.
//!
//! API Reference: https://developer.themoviedb.org/reference/search-movie

use serde::{Deserialize, Serialize};

/// Search response (one page of results)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Page number
    #[serde(default)]
    pub page: u32,
    /// Results ordered by TMDB relevance
    #[serde(default)]
    pub results: Vec<MovieResult>,
    /// Total number of results across all pages
    #[serde(default)]
    pub total_results: u32,
}

/// A movie in search results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovieResult {
    /// TMDB movie id
    pub id: i64,
    /// Localised title
    #[serde(default)]
    pub title: String,
    /// Original-language title
    pub original_title: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty)
    pub release_date: Option<String>,
}

/// Error response body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    /// TMDB status code (not the HTTP status)
    pub status_code: Option<i32>,
    /// Human readable message
    #[serde(default)]
    pub status_message: String,
}
