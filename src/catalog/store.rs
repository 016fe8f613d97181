//! Snapshot file storage.
//!
//! One pretty-printed JSON file per run, named after the run date
//! (`2025-01-31.json`). Saving keeps only eligible series and stamps the
//! current date. Loading fails fast on unreadable or malformed files: a
//! silently discarded snapshot would lose every previously resolved id.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::{self, Catalog, Snapshot};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Load a snapshot from disk.
pub fn load(path: &Path) -> Result<Snapshot, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| StoreError::Read(path.to_path_buf(), e))?;
    let mut snapshot: Snapshot =
        serde_json::from_str(&contents).map_err(|e| StoreError::Parse(path.to_path_buf(), e))?;

    // The map key is the series id; older files may omit or disagree with `id`.
    for (key, series) in snapshot.collections.iter_mut() {
        if series.id != *key {
            tracing::debug!(series = %key, stored = %series.id, "Taking series id from map key");
            series.id = key.clone();
        }
    }

    tracing::info!(
        path = %path.display(),
        date = %snapshot.date,
        series = snapshot.collections.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Save the eligible part of a catalog, stamped with today's date.
pub fn save(catalog: &Catalog, path: &Path) -> Result<Snapshot, StoreError> {
    save_dated(catalog, path, today())
}

/// Save the eligible part of a catalog, stamped with the given date.
pub fn save_dated(catalog: &Catalog, path: &Path, date: NaiveDate) -> Result<Snapshot, StoreError> {
    let snapshot = Snapshot {
        date: date.format(DATE_FORMAT).to_string(),
        collections: model::eligible(catalog),
    };

    let contents = serde_json::to_string_pretty(&snapshot).map_err(StoreError::Serialize)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| StoreError::Write(dir.to_path_buf(), e))?;
    }

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| StoreError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| StoreError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!(
        path = %path.display(),
        total = catalog.len(),
        eligible = snapshot.collections.len(),
        "Saved snapshot"
    );
    Ok(snapshot)
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Path of the snapshot for `date` inside `dir`.
pub fn snapshot_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.json", date.format(DATE_FORMAT)))
}

/// Find the most recent dated snapshot in `dir`.
///
/// Files whose name isn't `YYYY-MM-DD.json` are ignored.
pub fn find_latest(dir: &Path) -> Result<Option<PathBuf>, StoreError> {
    if !dir.exists() {
        return Ok(None);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::Read(dir.to_path_buf(), e))?;

    let latest = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter_map(|path| {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                return None;
            }
            let stem = path.file_stem()?.to_str()?;
            let date = NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()?;
            Some((date, path))
        })
        .max_by_key(|(date, _)| *date)
        .map(|(_, path)| path);

    Ok(latest)
}

/// Snapshot storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse snapshot {0}: {1}")]
    Parse(PathBuf, serde_json::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}
