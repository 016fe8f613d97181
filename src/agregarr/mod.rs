//! Agregarr integration
//!
//! The collection-curation service: one collection per eligible series,
//! sourced from the series' Radarr tag.

pub mod dto;
mod adapter;
mod client;

pub use adapter::SOURCE_TYPE;
pub use client::{AgregarrClient, PROBE_PATHS, ProbeResult};

use crate::config::Config;
use crate::error::Result;

/// Build a client from configuration, failing when Agregarr isn't configured.
pub fn from_config(config: &Config) -> Result<AgregarrClient> {
    let agregarr = config.require_agregarr()?;
    Ok(AgregarrClient::new(
        &agregarr.host,
        agregarr.api_key.clone(),
        config.http_options(),
    )?)
}
