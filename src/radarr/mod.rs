//! Radarr integration
//!
//! The movie-acquisition service: movies are added here, tagged with their
//! series' tag label.
//!
//! API docs: https://radarr.video/docs/api/

pub mod dto;
mod adapter;
mod client;

pub use adapter::AcquisitionDefaults;
pub use client::RadarrClient;

use crate::config::Config;
use crate::error::Result;

/// Build a client from configuration, failing when Radarr isn't configured.
pub fn from_config(config: &Config) -> Result<RadarrClient> {
    let radarr = config.require_radarr()?;
    let defaults = AcquisitionDefaults {
        root_folder_path: radarr.root_folder_path.clone(),
        quality_profile_id: radarr.quality_profile_id,
        monitored: radarr.monitored,
        search_for_movie: radarr.search_for_movie,
    };
    Ok(RadarrClient::new(
        &radarr.host,
        radarr.api_key.clone(),
        defaults,
        config.http_options(),
    )?)
}
