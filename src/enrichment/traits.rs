//! Trait definitions for the movie-database client.
//!
//! The matcher is generic over [`MovieLookup`] so tests can substitute a
//! scripted mock for the real TMDB client.

use async_trait::async_trait;

use super::domain::{LookupError, MovieCandidate};

/// Trait for movie-database title search.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Search by title, optionally narrowed to a release year.
    async fn search(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<MovieCandidate>, LookupError>;
}

#[async_trait]
impl MovieLookup for super::tmdb::TmdbClient {
    async fn search(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<MovieCandidate>, LookupError> {
        self.search_movie(title, year).await
    }
}

#[async_trait]
impl<L: MovieLookup + ?Sized> MovieLookup for &L {
    async fn search(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<MovieCandidate>, LookupError> {
        (**self).search(title, year).await
    }
}
