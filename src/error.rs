//! Application-wide error types.
//!
//! Each subsystem has its own `thiserror` enum; [`Error`] aggregates them so
//! the command layer can use `?` everywhere. `main` converts into `anyhow`.
//!
//! # Example
//!
//! ```ignore
//! use crate::error::{Result, ResultExt};
//!
//! fn previous_catalog(path: &Path) -> Result<Catalog> {
//!     let snapshot = store::load(path).with_context("Failed to load previous snapshot")?;
//!     Ok(snapshot.collections)
//! }
//! ```

use std::path::PathBuf;

use crate::catalog::StoreError;
use crate::config::ConfigError;
use crate::enrichment::LookupError;
use crate::scraper::ScrapeError;
use crate::sync::SyncError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Title lookup error
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Snapshot read/write error
    #[error("Snapshot error: {0}")]
    Store(#[from] StoreError),

    /// Site scraping error
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Downstream service error
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// No snapshot to work from
    #[error("No snapshot found in {0}")]
    NoSnapshot(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSnapshot(PathBuf::from("/data/snapshots"));
        assert!(err.to_string().contains("/data/snapshots"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(SyncError::Network("connection refused".to_string()))
            .context("while listing collections");
        let msg = err.to_string();
        assert!(msg.contains("while listing collections"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = Error::from(ConfigError::Incomplete("radarr"));
        assert_eq!(
            err.to_string(),
            "radarr host and api_key must be set in the config file"
        );
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), SyncError> =
            Err(SyncError::Parse("bad json".to_string()));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }
}
