//! Film enrichment module - resolves scraped titles to movie-database ids.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`tmdb/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Title** - Search variants for decorated cinema titles
//! - **Matcher** - Rate-limited orchestration of the lookup flow
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{CatalogMatcher, TmdbClient};
//!
//! let client = TmdbClient::new("your-api-key", Duration::from_secs(30))?;
//! let matcher = CatalogMatcher::new(client, Duration::from_millis(250));
//! let summary = matcher.resolve_catalog(&mut catalog).await?;
//! ```

pub mod domain;
pub mod matcher;
pub mod throttle;
pub mod title;
pub mod tmdb;
pub mod traits;

pub use domain::{LookupError, MatchOutcome, MatchSummary, MovieCandidate};
pub use matcher::CatalogMatcher;
pub use tmdb::TmdbClient;
pub use traits::MovieLookup;
