//! Idempotent tag and movie operations on the tagging service.
//!
//! - [`create_or_get_tag`] never creates a second tag with the same label
//! - [`add_movie_with_tags`] treats an already-tracked movie as "attach the
//!   missing tags", never duplicating tag ids
//! - [`sync_movies`] pushes every resolved film of every eligible series

use crate::model::Catalog;
use crate::sync::domain::{MovieOutcome, MovieRequest, SyncError, TagRemoval};
use crate::sync::traits::TaggingApi;

/// Totals for one movie sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieSyncReport {
    /// Eligible series processed
    pub series: usize,
    /// Movies newly added
    pub added: usize,
    /// Existing movies that received a new tag
    pub tagged: usize,
    /// Existing movies that already had the tag
    pub unchanged: usize,
    /// Per-movie or per-series failures
    pub failed: usize,
}

/// Return the id of the tag with `label`, creating it if absent.
pub async fn create_or_get_tag<T>(api: &T, label: &str) -> Result<i64, SyncError>
where
    T: TaggingApi + ?Sized,
{
    let tags = api.list_tags().await?;
    if let Some(tag) = tags.iter().find(|t| t.label == label) {
        tracing::debug!(label, id = tag.id, "Tag already exists");
        return Ok(tag.id);
    }

    let tag = api.create_tag(label).await?;
    tracing::info!(label, id = tag.id, "Created tag");
    Ok(tag.id)
}

/// Delete the tag with `label`, if any.
pub async fn delete_tag_by_label<T>(api: &T, label: &str) -> Result<TagRemoval, SyncError>
where
    T: TaggingApi + ?Sized,
{
    let tags = api.list_tags().await?;
    let Some(tag) = tags.into_iter().find(|t| t.label == label) else {
        return Ok(TagRemoval::Absent);
    };

    api.delete_tag(tag.id).await?;
    tracing::info!(label, id = tag.id, "Deleted tag");
    Ok(TagRemoval::Deleted(tag.id))
}

/// Add a movie, or merge the requested tags into an already-tracked movie.
pub async fn add_movie_with_tags<T>(
    api: &T,
    request: &MovieRequest,
) -> Result<MovieOutcome, SyncError>
where
    T: TaggingApi + ?Sized,
{
    match api.add_movie(request).await {
        Ok(id) => {
            tracing::info!(title = %request.title, year = request.year, id, "Added movie");
            Ok(MovieOutcome::Added(id))
        }
        Err(SyncError::AlreadyExists(_)) => {
            let existing = api.find_movie(request.tmdb_id).await?.ok_or_else(|| {
                SyncError::NotFound(format!("movie with TMDB id {}", request.tmdb_id))
            })?;

            let mut tags = existing.tags.clone();
            let mut attached = 0;
            for tag in &request.tags {
                if !tags.contains(tag) {
                    tags.push(*tag);
                    attached += 1;
                }
            }

            if attached == 0 {
                tracing::debug!(title = %request.title, "Movie already has all tags");
                return Ok(MovieOutcome::AlreadyTagged);
            }

            api.update_movie_tags(existing.id, &tags).await?;
            tracing::info!(title = %request.title, attached, "Tagged existing movie");
            Ok(MovieOutcome::TagsMerged(attached))
        }
        Err(e) => Err(e),
    }
}

/// Push every resolved film of every eligible series, tagged with its series.
///
/// Failures are per item: a series whose tag can't be resolved is skipped,
/// a movie that can't be added is counted, and the pass continues.
pub async fn sync_movies<T>(api: &T, catalog: &Catalog) -> MovieSyncReport
where
    T: TaggingApi + ?Sized,
{
    let mut report = MovieSyncReport::default();

    for (id, series) in catalog.iter().filter(|(_, s)| s.is_eligible()) {
        report.series += 1;
        let label = series.tag_label();

        let tag_id = match create_or_get_tag(api, &label).await {
            Ok(tag_id) => tag_id,
            Err(e) => {
                tracing::warn!(
                    series = %id,
                    name = %series.name,
                    error = %e,
                    "Failed to create tag"
                );
                report.failed += 1;
                continue;
            }
        };

        let mut added = 0;
        for film in series.movies.iter().filter(|f| f.is_resolved()) {
            let request = MovieRequest {
                tmdb_id: film.tmdb_id,
                title: film.title.clone(),
                year: film.year,
                tags: vec![tag_id],
            };

            match add_movie_with_tags(api, &request).await {
                Ok(MovieOutcome::Added(_)) => {
                    report.added += 1;
                    added += 1;
                }
                Ok(MovieOutcome::TagsMerged(_)) => {
                    report.tagged += 1;
                    added += 1;
                }
                Ok(MovieOutcome::AlreadyTagged) => {
                    report.unchanged += 1;
                    added += 1;
                }
                Err(e) => {
                    tracing::warn!(title = %film.title, error = %e, "Failed to add movie");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            series = %id,
            name = %series.name,
            added,
            valid = series.valid_movies(),
            "Synced series movies"
        );
    }

    report
}
