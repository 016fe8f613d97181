//! Merging a fresh scrape into the previously persisted catalog.
//!
//! Existing films are never replaced, so ids resolved in earlier runs survive.
//! New films are appended only when their title is not already present.

use std::collections::HashSet;

use crate::model::{Catalog, Film};

/// Merge `new` films into `existing`.
///
/// Result: `existing` in order, then every film of `new` whose title (exact,
/// case-sensitive) does not appear in `existing`.
pub fn merge_films(existing: &[Film], new: &[Film]) -> Vec<Film> {
    let known: HashSet<&str> = existing.iter().map(|f| f.title.as_str()).collect();

    existing
        .iter()
        .chain(new.iter().filter(|f| !known.contains(f.title.as_str())))
        .cloned()
        .collect()
}

/// Merge a freshly scraped catalog with the previous snapshot's catalog.
///
/// Series present in both get their film lists merged; series only in the
/// scrape are kept as scraped. Series that are no longer published are
/// dropped, which makes them candidates for downstream deletion.
pub fn merge_catalog(mut scraped: Catalog, previous: &Catalog) -> Catalog {
    for (id, series) in scraped.iter_mut() {
        let Some(old) = previous.get(id) else {
            continue;
        };

        let merged = merge_films(&old.movies, &series.movies);
        if merged.len() != series.movies.len() {
            tracing::info!(
                series = %id,
                name = %series.name,
                from = series.movies.len(),
                to = merged.len(),
                "Updated series film count"
            );
        }
        series.movies = merged;
    }

    let dropped = previous.keys().filter(|id| !scraped.contains_key(*id)).count();
    if dropped > 0 {
        tracing::info!(dropped, "Series no longer listed on the site");
    }

    scraped
}
