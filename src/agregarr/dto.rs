//! Agregarr v1 API Data Transfer Objects

use serde::{Deserialize, Deserializer, Serialize};

/// Wrapper returned by `GET /collections` and `POST /collections/create`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    #[serde(default)]
    pub collection_configs: Vec<CollectionSummary>,
}

/// The fields of a listed collection that reconciliation reads.
///
/// Collections we did not create may carry `null` in any of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionSummary {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Tag label for `radarrtag` sources
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtype: String,
}

/// Where a collection is shown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityConfig {
    pub users_home: bool,
    pub server_owner_home: bool,
    pub library_recommended: bool,
}

/// A collection configuration, as sent to `POST /collections/create`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    pub id: String,
    pub name: String,
    pub visibility_config: VisibilityConfig,
    pub max_items: u32,

    /// Source kind, `radarrtag` for ours
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Tag label for `radarrtag` sources
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtype: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub media_type: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub library_ids: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(skip_serializing_if = "is_false")]
    pub randomize_order: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub auto_poster: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub search_missing_movies: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub auto_approve_movies: bool,
    /// `direct` or `overseerr`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub download_mode: String,

    pub radarr_instance_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub direct_download_radarr_profile_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub direct_download_radarr_root_folder: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub radarr_tag_id: i64,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Agregarr has returned ids both as strings and as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
        Null,
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
        Id::Null => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
