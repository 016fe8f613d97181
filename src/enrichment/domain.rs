//! Internal domain models for movie identification.
//!
//! These types are OUR types - they don't change when the TMDB API changes.
//! All external API responses get converted into these types via adapters.

/// A single search result from the movie database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCandidate {
    /// TMDB movie id
    pub id: i64,
    /// Title as known to the movie database
    pub title: String,
    /// Release date (YYYY-MM-DD), if known
    pub release_date: Option<String>,
}

impl MovieCandidate {
    /// Release year parsed from the release date.
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// Outcome of resolving one film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A variant produced at least one candidate; the first one wins.
    Resolved {
        candidate: MovieCandidate,
        /// The title variant that produced the match
        variant: String,
    },
    /// No variant produced a candidate.
    NotFound,
}

/// Totals for one matching pass over a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Films resolved during this pass
    pub resolved: usize,
    /// Films left unresolved
    pub not_found: usize,
    /// Films that already carried an identifier
    pub skipped: usize,
}

/// Errors that can occur while talking to the movie database.
///
/// "No candidate" is not an error; see [`MatchOutcome::NotFound`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("TMDB API key is required")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("TMDB API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_year() {
        let candidate = MovieCandidate {
            id: 1,
            title: "Carol".to_string(),
            release_date: Some("2015-11-20".to_string()),
        };
        assert_eq!(candidate.year(), Some(2015));

        let undated = MovieCandidate {
            release_date: Some(String::new()),
            ..candidate
        };
        assert_eq!(undated.year(), None);
    }

    #[test]
    fn test_api_error_display() {
        let err = LookupError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid API key"));
    }
}
