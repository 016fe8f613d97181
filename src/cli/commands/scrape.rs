//! Scrape pipeline commands: scrape, resolve, merge, save.

use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::catalog::{merge_catalog, store};
use crate::config::{Config, TMDB_API_KEY_ENV};
use crate::enrichment::{CatalogMatcher, MovieLookup, TmdbClient};
use crate::error::{Result, ResultExt};
use crate::model::{Catalog, Snapshot};
use crate::scraper::{self, MetrographScraper, SeriesSource};

use super::collections::sync_downstream;

/// Scrape, match, merge with the previous snapshot and save today's snapshot.
pub fn cmd_scrape(
    rt: &Runtime,
    config: &Config,
    previous: Option<&Path>,
    output_dir: &Path,
    no_match: bool,
) -> anyhow::Result<PathBuf> {
    rt.block_on(async {
        let (path, snapshot) = refresh(config, previous, output_dir, no_match).await?;
        print_summary(&path, &snapshot);
        anyhow::Ok(path)
    })
}

/// End-to-end run: refresh the snapshot, then optionally sync downstream.
pub fn cmd_run(rt: &Runtime, config: &Config, sync: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let output_dir = &config.settings.output_dir;
        let (path, snapshot) = refresh(config, None, output_dir, false).await?;
        print_summary(&path, &snapshot);

        if sync {
            sync_downstream(config, &snapshot.collections).await?;
        } else {
            println!();
            println!("Skipping downstream sync (pass --sync to enable)");
        }
        anyhow::Ok(())
    })
}

/// Scrape the site and fold the result into the stored catalog.
async fn refresh(
    config: &Config,
    previous: Option<&Path>,
    output_dir: &Path,
    no_match: bool,
) -> Result<(PathBuf, Snapshot)> {
    let previous = load_previous(previous, output_dir)?;
    let source = MetrographScraper::new(config.settings.timeout())?;

    let matcher = if no_match {
        tracing::info!("Skipping TMDB matching");
        None
    } else {
        tmdb_matcher(config)?
    };

    let path = store::snapshot_path(output_dir, store::today());
    let snapshot = refresh_catalog(&source, matcher.as_ref(), &previous, &path).await?;
    Ok((path, snapshot))
}

/// Scrape, merge into `previous`, resolve what is still unresolved and save
/// the eligible series to `path`.
///
/// The previous catalog is merged in before matching, so films resolved in
/// earlier runs are never looked up again.
async fn refresh_catalog<S, L>(
    source: &S,
    matcher: Option<&CatalogMatcher<L>>,
    previous: &Catalog,
    path: &Path,
) -> Result<Snapshot>
where
    S: SeriesSource,
    L: MovieLookup,
{
    let scraped = scraper::build_catalog(source).await?;
    tracing::info!(series = scraped.len(), "Scrape complete");

    let mut catalog = merge_catalog(scraped, previous);

    if let Some(matcher) = matcher {
        let summary = matcher.resolve_catalog(&mut catalog).await?;
        println!(
            "TMDB: {} resolved, {} not found, {} already known",
            summary.resolved, summary.not_found, summary.skipped
        );
    }

    Ok(store::save(&catalog, path)?)
}

/// Load the explicit previous snapshot, or the newest one in `output_dir`.
///
/// A previous snapshot that exists but can't be read aborts the run.
fn load_previous(previous: Option<&Path>, output_dir: &Path) -> Result<Catalog> {
    let path = match previous {
        Some(path) => Some(path.to_path_buf()),
        None => store::find_latest(output_dir)?,
    };

    match path {
        Some(path) => {
            let snapshot = store::load(&path).with_context("Failed to load previous snapshot")?;
            Ok(snapshot.collections)
        }
        None => {
            tracing::info!(dir = %output_dir.display(), "No previous snapshot, starting fresh");
            Ok(Catalog::new())
        }
    }
}

/// A TMDB matcher, or `None` when no key is available.
fn tmdb_matcher(config: &Config) -> Result<Option<CatalogMatcher<TmdbClient>>> {
    let Some(api_key) = config.tmdb_api_key() else {
        tracing::warn!(
            "No TMDB API key configured (tmdb.api_key or {}); films stay unresolved",
            TMDB_API_KEY_ENV
        );
        return Ok(None);
    };

    let client = TmdbClient::new(api_key, config.settings.timeout())?;
    Ok(Some(CatalogMatcher::new(client, config.settings.rate_limit())))
}

fn print_summary(path: &Path, snapshot: &Snapshot) {
    println!();
    println!("Saved {} eligible series to {}", snapshot.collections.len(), path.display());
    for (id, series) in &snapshot.collections {
        println!(
            "  {:>8}  {} ({} of {} films resolved)",
            id,
            series.name,
            series.valid_movies(),
            series.movies.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::save_dated;
    use crate::enrichment::matcher::DEFAULT_RATE_LIMIT;
    use crate::enrichment::traits::mocks::MockLookup;
    use crate::error::Error;
    use crate::scraper::mocks::MockSource;
    use crate::test_utils::{eligible_series, resolved_film, series_with};
    use chrono::NaiveDate;

    #[tokio::test(start_paused = true)]
    async fn test_refresh_keeps_known_ids_and_saves_eligible_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2025-03-01.json");

        let mut previous = Catalog::new();
        previous.insert(
            "200".to_string(),
            series_with(
                "200",
                "Todd Haynes",
                vec![resolved_film("Carol", 258480), resolved_film("Safe", 2)],
            ),
        );

        let source = MockSource::new()
            .with_series(
                "Todd Haynes",
                "/series/?vista_series_id=200",
                &[("Carol", "Todd Haynes / 2015"), ("Far from Heaven", "2002")],
            )
            .with_series(
                "Ozu",
                "/series/?vista_series_id=100",
                &[("Late Spring", ""), ("Tokyo Story", "")],
            );
        let lookup = MockLookup::empty()
            .with_match("Carol", 999)
            .with_match("Far from Heaven", 10712)
            .with_match("Late Spring", 20532)
            .with_match("Tokyo Story", 18148);
        let matcher = CatalogMatcher::new(&lookup, DEFAULT_RATE_LIMIT);

        let snapshot = refresh_catalog(&source, Some(&matcher), &previous, &path)
            .await
            .unwrap();

        assert_eq!(
            lookup.searched_titles(),
            vec!["Late Spring", "Tokyo Story", "Far from Heaven"]
        );

        let haynes = &snapshot.collections["200"];
        let titles: Vec<_> = haynes.movies.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Carol", "Safe", "Far from Heaven"]);
        assert_eq!(haynes.movies[0].tmdb_id, 258480);
        assert_eq!(haynes.movies[2].tmdb_id, 10712);

        // Two resolved films is not enough to be saved.
        assert!(!snapshot.collections.contains_key("100"));
        let saved = store::load(&path).unwrap();
        assert_eq!(saved.collections.keys().collect::<Vec<_>>(), vec!["200"]);
    }

    #[tokio::test]
    async fn test_refresh_without_matcher_keeps_previous_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2025-03-01.json");

        let mut previous = Catalog::new();
        previous.insert("1".to_string(), eligible_series("1", "Old"));
        let source = MockSource::new().with_series(
            "Old",
            "/series/?vista_series_id=1",
            &[("First", ""), ("Fourth", "")],
        );

        let snapshot = refresh_catalog::<_, MockLookup>(&source, None, &previous, &path)
            .await
            .unwrap();

        let old = &snapshot.collections["1"];
        assert_eq!(old.movies.len(), 4);
        assert_eq!(old.valid_movies(), 3);
        assert!(!old.movies[3].is_resolved());
    }

    #[test]
    fn test_load_previous_defaults_to_latest_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::new();
        catalog.insert("1".to_string(), eligible_series("1", "Old"));
        let old = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        save_dated(&catalog, &store::snapshot_path(dir.path(), old), old).unwrap();

        catalog.insert("2".to_string(), eligible_series("2", "New"));
        let new = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        save_dated(&catalog, &store::snapshot_path(dir.path(), new), new).unwrap();

        let previous = load_previous(None, dir.path()).unwrap();
        assert_eq!(previous.len(), 2);
    }

    #[test]
    fn test_load_previous_empty_dir_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_previous(None, dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_previous_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2025-03-01.json"), "{not json").unwrap();

        let err = load_previous(None, dir.path()).unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().starts_with("Failed to load previous snapshot"));
    }

    #[test]
    fn test_load_previous_explicit_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_previous(Some(&dir.path().join("nope.json")), dir.path()).is_err());
    }
}
