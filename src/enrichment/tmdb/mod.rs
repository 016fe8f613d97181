//! TMDB (The Movie Database) integration
//!
//! Resolves scraped film titles to TMDB movie ids.
//!
//! API docs: https://developer.themoviedb.org/docs

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_candidates;
pub use client::TmdbClient;
