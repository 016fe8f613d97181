//! Catalog matcher - resolves scraped films to TMDB ids
//!
//! For each film the title variants are searched in order; the first variant
//! with at least one candidate wins and its first candidate is taken. There is
//! no ranking among candidates.
//!
//! Every search goes through a [`Throttle`], so no two requests are ever sent
//! closer together than the configured spacing. A film with no candidate is
//! left unresolved and the pass continues; a transport or HTTP error aborts
//! the whole pass.

use std::time::Duration;

use crate::enrichment::{
    domain::{LookupError, MatchOutcome, MatchSummary},
    throttle::Throttle,
    title,
    traits::MovieLookup,
};
use crate::model::{Catalog, Film};

/// Default spacing between TMDB requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(250);

/// Resolves films against a movie-database lookup.
pub struct CatalogMatcher<L> {
    lookup: L,
    throttle: Throttle,
}

impl<L: MovieLookup> CatalogMatcher<L> {
    /// Create a matcher with the given minimum spacing between requests.
    pub fn new(lookup: L, rate_limit: Duration) -> Self {
        Self {
            lookup,
            throttle: Throttle::new(rate_limit),
        }
    }

    /// Resolve a single film.
    pub async fn resolve(&self, film: &Film) -> Result<MatchOutcome, LookupError> {
        let variants = title::variants(&film.title);

        for (i, variant) in variants.into_iter().enumerate() {
            if i > 0 {
                tracing::debug!(title = %film.title, %variant, "Trying title variant");
            }

            self.throttle.wait().await;
            let candidates = self.lookup.search(&variant, film.known_year()).await?;

            if let Some(candidate) = candidates.into_iter().next() {
                if i > 0 {
                    tracing::debug!(title = %film.title, %variant, "Matched on variant");
                }
                return Ok(MatchOutcome::Resolved { candidate, variant });
            }
        }

        Ok(MatchOutcome::NotFound)
    }

    /// Resolve every unresolved film in a sequence, in order.
    ///
    /// Films that already carry an id are left untouched.
    pub async fn resolve_films(&self, films: &mut [Film]) -> Result<MatchSummary, LookupError> {
        let mut summary = MatchSummary::default();

        for film in films.iter_mut() {
            if film.is_resolved() {
                summary.skipped += 1;
                continue;
            }

            match self.resolve(film).await? {
                MatchOutcome::Resolved { candidate, .. } => {
                    tracing::info!(
                        title = %film.title,
                        tmdb_id = candidate.id,
                        release_year = ?candidate.year(),
                        "Found TMDB id"
                    );
                    film.tmdb_id = candidate.id;
                    summary.resolved += 1;
                }
                MatchOutcome::NotFound => {
                    tracing::warn!(
                        title = %film.title,
                        year = film.year,
                        "No TMDB results for title or any variation"
                    );
                    summary.not_found += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Resolve every unresolved film in a catalog, series in id order.
    pub async fn resolve_catalog(
        &self,
        catalog: &mut Catalog,
    ) -> Result<MatchSummary, LookupError> {
        let mut total = MatchSummary::default();

        for (id, series) in catalog.iter_mut() {
            tracing::debug!(
                series = %id,
                name = %series.name,
                films = series.movies.len(),
                "Matching series"
            );
            let summary = self.resolve_films(&mut series.movies).await?;
            total.resolved += summary.resolved;
            total.not_found += summary.not_found;
            total.skipped += summary.skipped;
        }

        tracing::info!(
            resolved = total.resolved,
            not_found = total.not_found,
            skipped = total.skipped,
            "Matching pass complete"
        );
        Ok(total)
    }
}
