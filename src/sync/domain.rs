//! Domain models shared by the tagging and collection services.
//!
//! Adapters convert their wire types into these; reconciliation logic only
//! ever sees these.

use crate::model::Series;

/// A tag in the acquisition system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

/// A quality profile in the acquisition system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
}

/// Request to add a movie to the acquisition system.
///
/// Root folder, quality profile and monitoring flags are adapter
/// configuration, not part of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRequest {
    pub tmdb_id: i64,
    pub title: String,
    pub year: i32,
    pub tags: Vec<i64>,
}

/// A movie already known to the acquisition system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingMovie {
    /// Acquisition-system id (not the TMDB id)
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub tags: Vec<i64>,
}

/// Result of ensuring a movie is present and tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOutcome {
    /// Newly added with the requested tags
    Added(i64),
    /// Already present; this many tags were attached
    TagsMerged(usize),
    /// Already present with every requested tag
    AlreadyTagged,
}

/// Result of removing a tag by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRemoval {
    Deleted(i64),
    /// No tag with that label exists
    Absent,
}

/// A collection as reported by the collection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamCollection {
    /// Opaque id assigned by the service
    pub id: String,
    pub name: String,
    /// Tag label the collection is sourced from
    pub subtype: String,
}

/// Acquisition defaults applied to every created collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDefaults {
    pub max_items: u32,
    pub library_ids: Vec<String>,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
}

impl Default for CollectionDefaults {
    fn default() -> Self {
        Self {
            max_items: 10,
            library_ids: vec!["1".to_string()],
            quality_profile_id: 0,
            root_folder_path: String::new(),
        }
    }
}

/// Request to create a collection for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub name: String,
    /// Tag label; always equal to the series' tag label
    pub subtype: String,
    pub tag_id: i64,
    pub defaults: CollectionDefaults,
}

impl NewCollection {
    /// Build the collection request for a series and its resolved tag id.
    pub fn for_series(series: &Series, tag_id: i64, defaults: &CollectionDefaults) -> Self {
        Self {
            name: series.collection_name(),
            subtype: series.tag_label(),
            tag_id,
            defaults: defaults.clone(),
        }
    }
}

/// Errors from the tagging and collection services.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The service reports the resource already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
