//! Core data models for the film catalog.
//!
//! Defines the primary entities: [`Film`], [`Series`], [`Catalog`] and the
//! persisted [`Snapshot`]. The serde layout matches the snapshot file:
//!
//! ```json
//! {"date": "2025-01-31",
//!  "collections": {"12345": {"name": "...", "url": "...", "id": "12345",
//!                            "movies": [{"title": "...", "director": "...",
//!                                        "year": 1999, "tmdb_id": 42}]}}}
//! ```
//!
//! Identifier fields are omitted when unresolved. The reader also accepts the
//! capitalised field names written by older releases of the tool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Minimum number of resolved films a series needs to be persisted and synced
/// (strictly greater than this value).
pub const MIN_VALID_MOVIES: usize = 2;

/// Prefix of every tag label and collection subtype owned by this tool.
pub const TAG_PREFIX: &str = "metrograph-";

/// Prefix of every downstream collection name owned by this tool.
pub const COLLECTION_PREFIX: &str = "Metrograph: ";

/// A single film within a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Title as scraped. Identity for deduplication (exact match).
    #[serde(alias = "Title")]
    pub title: String,
    /// Director, empty when unknown
    #[serde(default, alias = "Director")]
    pub director: String,
    /// Release year, 0 when unknown
    #[serde(default, alias = "Year")]
    pub year: i32,
    /// TMDB movie id, 0 when unresolved
    #[serde(default, skip_serializing_if = "is_zero")]
    pub tmdb_id: i64,
    /// IMDb id, empty when unknown
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub imdb_id: String,
}

impl Film {
    /// Create an unresolved film with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Whether the film carries a movie-database identifier.
    pub fn is_resolved(&self) -> bool {
        self.tmdb_id > 0
    }

    /// Release year, if known.
    pub fn known_year(&self) -> Option<i32> {
        (self.year > 0).then_some(self.year)
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A themed program of films published by the cinema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Display name
    #[serde(alias = "Name")]
    pub name: String,
    /// Source page URL
    #[serde(default, alias = "URL")]
    pub url: String,
    /// Stable id extracted from the source URL
    #[serde(default, alias = "ID")]
    pub id: String,
    /// Films in scrape order, then merge-append order
    #[serde(default, alias = "Movies")]
    pub movies: Vec<Film>,
}

impl Series {
    /// Number of films with a resolved identifier.
    pub fn valid_movies(&self) -> usize {
        self.movies.iter().filter(|f| f.is_resolved()).count()
    }

    /// Whether the series is eligible for persistence and downstream sync.
    pub fn is_eligible(&self) -> bool {
        self.valid_movies() > MIN_VALID_MOVIES
    }

    /// Label of the tagging-service tag for this series.
    pub fn tag_label(&self) -> String {
        tag_label(&self.id)
    }

    /// Name of the downstream collection for this series.
    pub fn collection_name(&self) -> String {
        collection_name(&self.name)
    }
}

/// Catalog of series keyed by series id.
///
/// A `BTreeMap` keeps file writes and log output in series-id order.
pub type Catalog = BTreeMap<String, Series>;

/// Keep only series that pass the eligibility threshold.
pub fn eligible(catalog: &Catalog) -> Catalog {
    catalog
        .iter()
        .filter(|(_, series)| series.is_eligible())
        .map(|(id, series)| (id.clone(), series.clone()))
        .collect()
}

/// Persisted, date-stamped catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Date of the run that wrote the snapshot (YYYY-MM-DD)
    pub date: String,
    /// Eligible series keyed by series id
    #[serde(default)]
    pub collections: Catalog,
}

/// Tag label for a series id. Collection subtypes use the same value.
pub fn tag_label(series_id: &str) -> String {
    format!("{TAG_PREFIX}{series_id}")
}

/// Downstream collection name for a series name.
pub fn collection_name(series_name: &str) -> String {
    format!("{COLLECTION_PREFIX}{series_name}")
}
