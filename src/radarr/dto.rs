//! Radarr v3 API Data Transfer Objects
//!
//! Only the fields we read or write are modelled. Movie updates go through
//! `serde_json::Value` so fields we don't know about survive the round trip.
//!
//! API Reference: https://radarr.video/docs/api/

use serde::{Deserialize, Serialize};

/// `/api/v3/tag` resource
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagResource {
    #[serde(default)]
    pub id: i64,
    pub label: String,
}

/// `/api/v3/qualityprofile` resource
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityProfileResource {
    pub id: i64,
    pub name: String,
}

/// `/api/v3/movie` resource (subset)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResource {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tmdb_id: i64,
    #[serde(default)]
    pub tags: Vec<i64>,
}

/// Body of `POST /api/v3/movie`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieResource {
    pub title: String,
    pub year: i32,
    pub tmdb_id: i64,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub tags: Vec<i64>,
    pub add_options: AddMovieOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieOptions {
    pub search_for_movie: bool,
}

/// One entry of a 400 validation error response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: Option<String>,
    #[serde(default)]
    pub error_message: String,
    pub error_code: Option<String>,
}
