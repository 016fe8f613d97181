//! Conversions between Radarr wire types and sync domain models.

use reqwest::StatusCode;

use super::dto::{
    AddMovieOptions, AddMovieResource, MovieResource, QualityProfileResource, TagResource,
    ValidationFailure,
};
use crate::sync::domain::{ExistingMovie, MovieRequest, QualityProfile, SyncError, Tag};
use crate::sync::http;

/// Radarr's validator code for a duplicate movie.
const MOVIE_EXISTS_CODE: &str = "MovieExistsValidator";

/// How new movies are added, taken from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionDefaults {
    pub root_folder_path: String,
    pub quality_profile_id: i64,
    pub monitored: bool,
    pub search_for_movie: bool,
}

pub fn to_tag(tag: TagResource) -> Tag {
    Tag {
        id: tag.id,
        label: tag.label,
    }
}

pub fn to_quality_profile(profile: QualityProfileResource) -> QualityProfile {
    QualityProfile {
        id: profile.id,
        name: profile.name,
    }
}

pub fn to_existing_movie(movie: MovieResource) -> ExistingMovie {
    ExistingMovie {
        id: movie.id,
        tmdb_id: movie.tmdb_id,
        title: movie.title,
        tags: movie.tags,
    }
}

pub fn to_add_movie(request: &MovieRequest, defaults: &AcquisitionDefaults) -> AddMovieResource {
    AddMovieResource {
        title: request.title.clone(),
        year: request.year,
        tmdb_id: request.tmdb_id,
        quality_profile_id: defaults.quality_profile_id,
        root_folder_path: defaults.root_folder_path.clone(),
        monitored: defaults.monitored,
        tags: request.tags.clone(),
        add_options: AddMovieOptions {
            search_for_movie: defaults.search_for_movie,
        },
    }
}

/// Classify a failed `POST /movie` response.
///
/// Radarr answers a duplicate add with a 400 and a validation array; that
/// becomes [`SyncError::AlreadyExists`], anything else an API error.
pub fn classify_add_failure(status: StatusCode, body: &str) -> SyncError {
    if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT {
        if let Ok(failures) = serde_json::from_str::<Vec<ValidationFailure>>(body) {
            if let Some(failure) = failures.iter().find(|f| is_duplicate(f)) {
                return SyncError::AlreadyExists(failure.error_message.clone());
            }
        }
    }
    http::api_error(status, body)
}

fn is_duplicate(failure: &ValidationFailure) -> bool {
    if failure.error_code.as_deref() == Some(MOVIE_EXISTS_CODE) {
        return true;
    }
    let message = failure.error_message.to_lowercase();
    message.contains("already been added") || message.contains("already exists")
}
