//! Radarr commands: movie sync and quality profiles.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::model::Catalog;
use crate::radarr;
use crate::sync::{MovieSyncReport, TaggingApi, sync_movies};

use super::load_snapshot;

/// Add every resolved film of every eligible series to Radarr.
pub fn cmd_radarr(rt: &Runtime, config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = load_snapshot(file, &config.settings.output_dir)?;
    let client = radarr::from_config(config)?;

    rt.block_on(async {
        let report = sync_movies(&client, &snapshot.collections).await;
        print_movie_report(&report, &snapshot.collections);
    });
    Ok(())
}

/// List quality profiles so `radarr.quality_profile_id` can be filled in.
pub fn cmd_profiles(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let client = radarr::from_config(config)?;

    rt.block_on(async {
        let profiles = client.list_quality_profiles().await?;
        println!("Quality profiles:");
        for profile in &profiles {
            let marker = if profile.id == config.radarr.quality_profile_id {
                " (configured)"
            } else {
                ""
            };
            println!("  {:>4}  {}{}", profile.id, profile.name, marker);
        }
        anyhow::Ok(())
    })
}

pub(super) fn print_movie_report(report: &MovieSyncReport, catalog: &Catalog) {
    println!();
    println!(
        "Movie sync: {} of {} series eligible",
        report.series,
        catalog.len()
    );
    println!("  Added:     {}", report.added);
    println!("  Tagged:    {}", report.tagged);
    println!("  Unchanged: {}", report.unchanged);
    if report.failed > 0 {
        println!("  Failed:    {} (see warnings above)", report.failed);
    }
}
