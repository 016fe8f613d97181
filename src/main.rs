//! Metrograph Watchlist - turns the Metrograph cinema's film series into
//! Radarr tags and Agregarr collections.
//!
//! Each run scrapes the series listings, resolves films to TMDB ids, merges
//! the result into the previous dated snapshot, and can then push eligible
//! series downstream.

pub mod agregarr;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod radarr;
pub mod scraper;
pub mod sync;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let loaded = config::load(&config_path);

    // Initialize logging; RUST_LOG directives take precedence
    let debug = args.debug || loaded.as_ref().is_ok_and(|c| c.settings.debug);
    let level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("metrograph_watchlist={level}"))
        }))
        .init();

    let config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_path.display(), "Loaded config");
            config
        }
        Err(e) => {
            tracing::warn!("{}", e);
            tracing::warn!(
                "Using default configuration; TMDB key falls back to {}",
                config::TMDB_API_KEY_ENV
            );
            config::Config::default()
        }
    };

    cli::run_command(&args, &config)
}
