//! Test utilities and fixtures for metrograph-watchlist tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{eligible_series, resolved_film, series_with};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert("100".to_string(), eligible_series("100", "Todd Haynes"));
//! catalog.insert(
//!     "200".to_string(),
//!     series_with("200", "Ozu", vec![resolved_film("Late Spring", 20532)]),
//! );
//! ```

use crate::model::{Film, Series};

/// A film already resolved to `tmdb_id`.
pub fn resolved_film(title: &str, tmdb_id: i64) -> Film {
    Film {
        tmdb_id,
        ..Film::new(title)
    }
}

/// A series with the given films and a URL derived from its id.
pub fn series_with(id: &str, name: &str, movies: Vec<Film>) -> Series {
    Series {
        name: name.to_string(),
        url: format!("/series/?vista_series_id={id}"),
        id: id.to_string(),
        movies,
    }
}

/// A series with three resolved films (TMDB ids 1, 2 and 3), just over the
/// eligibility threshold.
pub fn eligible_series(id: &str, name: &str) -> Series {
    series_with(
        id,
        name,
        vec![
            resolved_film("First", 1),
            resolved_film("Second", 2),
            resolved_film("Third", 3),
        ],
    )
}
