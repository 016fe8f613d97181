//! Adapter layer: Convert TMDB DTOs to domain models
//!
//! This is the ONLY place where TMDB DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::MovieCandidate;

/// Convert a search response into candidates, keeping TMDB's order.
pub fn to_candidates(response: dto::SearchResponse) -> Vec<MovieCandidate> {
    response.results.into_iter().map(to_candidate).collect()
}

fn to_candidate(result: dto::MovieResult) -> MovieCandidate {
    MovieCandidate {
        id: result.id,
        title: result.title,
        release_date: result.release_date.filter(|d| !d.is_empty()),
    }
}
