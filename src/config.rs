//! Configuration system using TOML files.
//!
//! The config file is looked up in this order:
//! - the path given with `--config`
//! - `./config.toml`
//! - the OS-standard config directory (`~/.config/metrograph-watchlist/config.toml`
//!   on Linux, `%APPDATA%\metrograph-watchlist\config.toml` on Windows)
//!
//! The configuration is loaded once at startup and handed to each client by
//! value; nothing observes changes mid-run.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sync::{CollectionDefaults, HttpOptions};

/// Environment variable consulted when no TMDB key is configured.
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Movie database credentials
    pub tmdb: TmdbConfig,

    /// Movie acquisition (tagging) service
    pub radarr: RadarrConfig,

    /// Collection curation service
    pub agregarr: AgregarrConfig,

    /// Run settings
    pub settings: Settings,
}

/// TMDB credentials
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// v3 API key; matching is skipped when absent
    pub api_key: Option<String>,
}

/// Radarr connection and acquisition defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadarrConfig {
    /// Base URL, e.g. `http://localhost:7878`
    pub host: String,
    pub api_key: String,
    /// Root folder new movies are added under
    pub root_folder_path: String,
    /// Quality profile for new movies (see the `profiles` command)
    pub quality_profile_id: i64,
    /// Monitor newly added movies
    pub monitored: bool,
    /// Start a search as soon as a movie is added
    pub search_for_movie: bool,
}

impl RadarrConfig {
    /// Whether host and key are both set.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.api_key.is_empty()
    }
}

/// Agregarr connection and collection defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgregarrConfig {
    /// Base URL, e.g. `http://localhost:7171`
    pub host: String,
    pub api_key: String,
    /// Media-server libraries new collections are attached to
    pub library_ids: Vec<String>,
    /// Maximum items shown per collection
    pub max_items: u32,
}

impl Default for AgregarrConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            library_ids: vec!["1".to_string()],
            max_items: 10,
        }
    }
}

impl AgregarrConfig {
    /// Whether host and key are both set.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.api_key.is_empty()
    }
}

/// Run settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum spacing between TMDB requests in milliseconds
    pub rate_limit_ms: u64,

    /// Enable debug logging
    pub debug: bool,

    /// Directory for dated snapshot files
    pub output_dir: PathBuf,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Accept self-signed certificates from Radarr/Agregarr
    pub accept_invalid_certs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 250,
            debug: false,
            output_dir: PathBuf::from("."),
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

impl Settings {
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// TMDB key from the config file, falling back to `TMDB_API_KEY`.
    pub fn tmdb_api_key(&self) -> Option<String> {
        self.tmdb
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(TMDB_API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
    }

    /// Connection settings for the downstream services.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: self.settings.timeout(),
            accept_invalid_certs: self.settings.accept_invalid_certs,
        }
    }

    /// Defaults applied to every created collection.
    pub fn collection_defaults(&self) -> CollectionDefaults {
        CollectionDefaults {
            max_items: self.agregarr.max_items,
            library_ids: self.agregarr.library_ids.clone(),
            quality_profile_id: self.radarr.quality_profile_id,
            root_folder_path: self.radarr.root_folder_path.clone(),
        }
    }

    /// Fail unless Radarr host and key are set.
    pub fn require_radarr(&self) -> Result<&RadarrConfig, ConfigError> {
        if self.radarr.is_configured() {
            Ok(&self.radarr)
        } else {
            Err(ConfigError::Incomplete("radarr"))
        }
    }

    /// Fail unless Agregarr host and key are set.
    pub fn require_agregarr(&self) -> Result<&AgregarrConfig, ConfigError> {
        if self.agregarr.is_configured() {
            Ok(&self.agregarr)
        } else {
            Err(ConfigError::Incomplete("agregarr"))
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("metrograph-watchlist"))
}

/// Resolve the config file to use when none is given explicitly.
pub fn default_path() -> PathBuf {
    let local = PathBuf::from("config.toml");
    if local.exists() {
        return local;
    }
    config_dir()
        .map(|d| d.join("config.toml"))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

/// Load configuration from disk
///
/// Called before logging is set up, so nothing is logged here.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("{0} host and api_key must be set in the config file")]
    Incomplete(&'static str),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.radarr.is_configured());
        assert_eq!(config.agregarr.max_items, 10);
        assert_eq!(config.settings.output_dir, PathBuf::from("."));
        assert!(!config.settings.accept_invalid_certs);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[radarr]
host = "http://radarr:7878"
api_key = "abc"
quality_profile_id = 4
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.radarr.is_configured());
        assert_eq!(config.radarr.quality_profile_id, 4);
        assert!(!config.agregarr.is_configured());
        assert_eq!(config.agregarr.library_ids, vec!["1"]);
        assert_eq!(config.settings.rate_limit(), Duration::from_millis(250));
        assert_eq!(config.settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_require_sections() {
        let config = Config::default();
        assert!(matches!(config.require_radarr(), Err(ConfigError::Incomplete("radarr"))));
        assert!(matches!(config.require_agregarr(), Err(ConfigError::Incomplete("agregarr"))));
    }

    #[test]
    fn test_collection_defaults_from_config() {
        let mut config = Config::default();
        config.radarr.quality_profile_id = 6;
        config.radarr.root_folder_path = "/movies".to_string();
        config.agregarr.max_items = 25;

        let defaults = config.collection_defaults();
        assert_eq!(defaults.quality_profile_id, 6);
        assert_eq!(defaults.root_folder_path, "/movies");
        assert_eq!(defaults.max_items, 25);
    }

    #[test]
    fn test_configured_tmdb_key_wins() {
        let mut config = Config::default();
        config.tmdb.api_key = Some("from-file".to_string());
        assert_eq!(config.tmdb_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[radarr\nhost = ").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse(_, _))));
        assert!(matches!(
            load(&dir.path().join("missing.toml")),
            Err(ConfigError::NotFound(_))
        ));
    }
}
