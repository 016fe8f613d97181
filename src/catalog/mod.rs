//! Catalog persistence: merging fresh scrapes into stored snapshots.
//!
//! - [`merge`]: combine a new scrape with the previous snapshot without
//!   losing resolved ids or duplicating films
//! - [`store`]: dated JSON snapshot files

pub mod merge;
pub mod store;

pub use merge::{merge_catalog, merge_films};
pub use store::{StoreError, find_latest, load, save, snapshot_path};
