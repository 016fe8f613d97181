//! Command-line interface for metrograph-watchlist.
//!
//! Commands cover the scrape pipeline (scrape, match, merge, save) and the
//! downstream sync with Radarr and Agregarr.

mod commands;

pub use commands::{Cli, Commands, run_command};
