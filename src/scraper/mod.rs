//! Scraping the cinema's series listings into a raw [`Catalog`].
//!
//! - [`SeriesSource`] - the seam: series index plus per-series film lists
//! - [`parse`] - HTML and metadata parsing, no I/O
//! - [`MetrographScraper`] - the live-site source
//! - [`build_catalog`] - assembles a catalog keyed by series id
//!
//! Films come out unresolved; identifier matching happens afterwards.

pub mod parse;
mod client;

use async_trait::async_trait;
use reqwest::Url;

use crate::model::{Catalog, Film, Series};

pub use client::{BASE_URL, MetrographScraper};

/// A series entry on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLink {
    pub name: String,
    /// As found in the page, possibly relative
    pub url: String,
}

/// A film entry on a series page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedFilm {
    pub title: String,
    /// Raw `director / year` text, empty when absent
    pub metadata: String,
}

impl ScrapedFilm {
    /// Convert to an unresolved [`Film`], parsing director and year.
    pub fn into_film(self) -> Film {
        let (director, year) = parse::parse_metadata(&self.metadata);
        Film {
            title: self.title,
            director,
            year,
            ..Default::default()
        }
    }
}

/// Source of series and their films.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Base URL relative series links resolve against.
    fn base_url(&self) -> &Url;

    /// List every series on the index page, in page order.
    async fn list_series(&self) -> Result<Vec<SeriesLink>, ScrapeError>;

    /// List the films of one series, in page order.
    async fn list_films(&self, series: &SeriesLink) -> Result<Vec<ScrapedFilm>, ScrapeError>;
}

/// Scrape every series into a catalog keyed by series id.
///
/// The index page is required. A series without an id is skipped; a series
/// whose page fails is kept with no films, so merging with the previous
/// snapshot preserves what was known about it.
pub async fn build_catalog<S>(source: &S) -> Result<Catalog, ScrapeError>
where
    S: SeriesSource + ?Sized,
{
    let links = source.list_series().await?;
    tracing::info!(count = links.len(), "Found series");

    let mut catalog = Catalog::new();
    for link in links {
        let Some(id) = parse::extract_series_id(&link.url, source.base_url()) else {
            tracing::warn!(
                name = %link.name,
                url = %link.url,
                "Series URL has no series id, skipping"
            );
            continue;
        };

        if catalog.contains_key(&id) {
            tracing::debug!(series = %id, name = %link.name, "Duplicate series entry");
            continue;
        }

        let movies: Vec<Film> = match source.list_films(&link).await {
            Ok(films) => films.into_iter().map(ScrapedFilm::into_film).collect(),
            Err(e) => {
                tracing::warn!(
                    series = %id,
                    name = %link.name,
                    error = %e,
                    "Failed to scrape series page"
                );
                Vec::new()
            }
        };

        tracing::info!(series = %id, name = %link.name, films = movies.len(), "Scraped series");
        catalog.insert(
            id.clone(),
            Series {
                name: link.name,
                url: link.url,
                id,
                movies,
            },
        );
    }

    Ok(catalog)
}

/// Scraping errors
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {0}")]
    InvalidUrl(String),

    #[error("Failed to parse page: {0}")]
    Parse(String),
}
