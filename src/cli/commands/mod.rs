//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `scrape`: scrape, match, merge and save a snapshot (`scrape`, `run`)
//! - `radarr`: movie sync and quality profiles
//! - `collections`: collection reconciliation and Agregarr diagnostics

mod collections;
mod radarr;
mod scrape;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Builder;

use crate::catalog::store;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Snapshot;

pub use collections::{cmd_collections, cmd_get_collections, cmd_sync, cmd_test_agregarr};
pub use radarr::{cmd_profiles, cmd_radarr};
pub use scrape::{cmd_run, cmd_scrape};

/// Metrograph Watchlist CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./config.toml, then the user config directory)
    #[arg(long, global = true, env = "METROGRAPH_WATCHLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Scrape series, resolve TMDB ids, merge with the previous snapshot and save
    Scrape {
        /// Snapshot to merge into (default: newest snapshot in the output directory)
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Directory for the dated snapshot (default: settings.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Skip TMDB matching
        #[arg(long)]
        no_match: bool,
    },
    /// Add every resolved film of a snapshot to Radarr, tagged by series
    Radarr {
        /// Snapshot file (default: newest snapshot in settings.output_dir)
        file: Option<PathBuf>,
    },
    /// List Radarr quality profiles
    Profiles,
    /// Reconcile Agregarr collections with a snapshot
    Collections {
        /// Snapshot file (default: newest snapshot in settings.output_dir)
        file: Option<PathBuf>,
    },
    /// Movie sync followed by collection reconciliation
    Sync {
        /// Snapshot file (default: newest snapshot in settings.output_dir)
        file: Option<PathBuf>,
    },
    /// Scrape, match, merge and save; optionally sync downstream
    Run {
        /// Also sync movies and collections
        #[arg(long)]
        sync: bool,
    },
    /// Probe Agregarr endpoints
    TestAgregarr,
    /// List Agregarr collections
    GetCollections,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    // Everything is sequential; a single-threaded runtime is enough.
    let rt = Builder::new_current_thread().enable_all().build()?;

    match &cli.command {
        Commands::Scrape {
            previous,
            output_dir,
            no_match,
        } => {
            let output_dir = output_dir.as_deref().unwrap_or(&config.settings.output_dir);
            cmd_scrape(&rt, config, previous.as_deref(), output_dir, *no_match)?;
        }
        Commands::Radarr { file } => cmd_radarr(&rt, config, file.as_deref())?,
        Commands::Profiles => cmd_profiles(&rt, config)?,
        Commands::Collections { file } => cmd_collections(&rt, config, file.as_deref())?,
        Commands::Sync { file } => cmd_sync(&rt, config, file.as_deref())?,
        Commands::Run { sync } => cmd_run(&rt, config, *sync)?,
        Commands::TestAgregarr => cmd_test_agregarr(&rt, config)?,
        Commands::GetCollections => cmd_get_collections(&rt, config)?,
    }

    Ok(())
}

/// Load the snapshot given on the command line, or the newest one in
/// `output_dir`.
fn load_snapshot(file: Option<&Path>, output_dir: &Path) -> Result<Snapshot> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => store::find_latest(output_dir)?
            .ok_or_else(|| Error::NoSnapshot(output_dir.to_path_buf()))?,
    };

    let snapshot = store::load(&path)?;
    println!(
        "Loaded {} series from {} (scraped on {})",
        snapshot.collections.len(),
        path.display(),
        snapshot.date
    );
    Ok(snapshot)
}
