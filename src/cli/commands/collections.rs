//! Agregarr commands: reconciliation and diagnostics.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::model::Catalog;
use crate::sync::{CollectionApi, ReconcileReport, Reconciler, sync_movies};
use crate::{agregarr, radarr};

use super::load_snapshot;
use super::radarr::print_movie_report;

/// Delete obsolete collections and create missing ones.
pub fn cmd_collections(rt: &Runtime, config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = load_snapshot(file, &config.settings.output_dir)?;
    let tagging = radarr::from_config(config)?;
    let collections = agregarr::from_config(config)?;

    rt.block_on(async {
        let reconciler = Reconciler::new(&tagging, &collections, config.collection_defaults());
        let report = reconciler.run(&snapshot.collections).await?;
        print_reconcile_report(&report);
        anyhow::Ok(())
    })
}

/// Movie sync followed by collection reconciliation.
pub fn cmd_sync(rt: &Runtime, config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = load_snapshot(file, &config.settings.output_dir)?;
    rt.block_on(sync_downstream(config, &snapshot.collections))
}

/// Push a catalog to both downstream services.
pub(super) async fn sync_downstream(config: &Config, catalog: &Catalog) -> anyhow::Result<()> {
    let tagging = radarr::from_config(config)?;
    let collections = agregarr::from_config(config)?;

    let movies = sync_movies(&tagging, catalog).await;
    print_movie_report(&movies, catalog);

    let reconciler = Reconciler::new(&tagging, &collections, config.collection_defaults());
    let report = reconciler.run(catalog).await?;
    print_reconcile_report(&report);
    Ok(())
}

/// Probe well-known Agregarr endpoints and print what answers.
pub fn cmd_test_agregarr(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let client = agregarr::from_config(config)?;
    println!("Testing Agregarr connection to: {}", config.agregarr.host);

    let results = rt.block_on(client.probe());
    for result in results {
        match result.status {
            Ok(status) => {
                println!("  {:<12} HTTP {}", result.path, status);
                if let Some(body) = result.body {
                    println!("               {}", body.trim());
                }
            }
            Err(e) => println!("  {:<12} error: {}", result.path, e),
        }
    }
    Ok(())
}

/// Print every collection Agregarr knows about.
pub fn cmd_get_collections(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let client = agregarr::from_config(config)?;

    rt.block_on(async {
        let collections = client.list_collections().await?;
        println!("Found {} collections", collections.len());
        for collection in &collections {
            if collection.subtype.is_empty() {
                println!("  [{}] {}", collection.id, collection.name);
            } else {
                println!("  [{}] {} ({})", collection.id, collection.name, collection.subtype);
            }
        }
        anyhow::Ok(())
    })
}

fn print_reconcile_report(report: &ReconcileReport) {
    println!();
    println!("Collections:");
    println!("  Deleted: {} (tags: {})", report.collections_deleted, report.tags_deleted);
    println!("  Created: {}", report.collections_created);
    if report.failures > 0 {
        println!("  Failed:  {} (see warnings above)", report.failures);
    }
}
