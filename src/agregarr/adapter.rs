//! Conversions between Agregarr wire types and sync domain models.

use super::dto::{CollectionConfig, CollectionSummary, VisibilityConfig};
use crate::sync::domain::{DownstreamCollection, NewCollection};

/// Source type for collections built from an acquisition-service tag.
pub const SOURCE_TYPE: &str = "radarrtag";

pub fn to_downstream(config: CollectionSummary) -> DownstreamCollection {
    DownstreamCollection {
        id: config.id,
        name: config.name,
        subtype: config.subtype,
    }
}

/// Build the full collection config for a new series collection.
///
/// Collections are visible everywhere, posters are generated, and missing
/// movies are requested straight from the acquisition service.
pub fn to_collection_config(request: &NewCollection) -> CollectionConfig {
    let defaults = &request.defaults;
    CollectionConfig {
        id: String::new(),
        name: request.name.clone(),
        visibility_config: VisibilityConfig {
            users_home: true,
            server_owner_home: true,
            library_recommended: true,
        },
        max_items: defaults.max_items,
        kind: SOURCE_TYPE.to_string(),
        subtype: request.subtype.clone(),
        media_type: "movie".to_string(),
        library_ids: defaults.library_ids.clone(),
        template: request.name.clone(),
        randomize_order: false,
        auto_poster: true,
        search_missing_movies: true,
        auto_approve_movies: true,
        download_mode: "direct".to_string(),
        radarr_instance_id: 0,
        direct_download_radarr_profile_id: defaults.quality_profile_id,
        direct_download_radarr_root_folder: defaults.root_folder_path.clone(),
        radarr_tag_id: request.tag_id,
    }
}
