//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GEOMAP_*)
//! 2. TOML config file (if GEOMAP_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GEOMAP_*)
/// 2. TOML config file (if GEOMAP_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite geocode cache.
    ///
    /// Set via GEOMAP_CACHE_DB_PATH environment variable.
    #[serde(default = "default_cache_db_path")]
    pub cache_db_path: PathBuf,

    /// Path to the SQLite record store holding contacts and accounts.
    ///
    /// Set via GEOMAP_STORE_DB_PATH environment variable.
    #[serde(default = "default_store_db_path")]
    pub store_db_path: PathBuf,

    /// Base URL of the Nominatim-compatible geocoding service.
    ///
    /// Set via GEOMAP_GEOCODER_BASE_URL environment variable.
    #[serde(default = "default_geocoder_base_url")]
    pub geocoder_base_url: String,

    /// User-Agent string for geocoding requests.
    ///
    /// Set via GEOMAP_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via GEOMAP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum interval between geocoding requests in milliseconds (0 disables).
    ///
    /// Set via GEOMAP_RATE_LIMIT_MS environment variable.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Maximum number of geocoding resolutions in flight per batch.
    ///
    /// Set via GEOMAP_MAX_CONCURRENCY environment variable.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of contacts loaded for the contact map.
    ///
    /// Set via GEOMAP_CONTACT_LIMIT environment variable.
    #[serde(default = "default_contact_limit")]
    pub contact_limit: usize,

    /// Maximum number of accounts loaded for the account map.
    ///
    /// Set via GEOMAP_ACCOUNT_LIMIT environment variable.
    #[serde(default = "default_account_limit")]
    pub account_limit: usize,

    /// Billing countries whose accounts appear on the account map.
    ///
    /// Set via GEOMAP_ACCOUNT_COUNTRIES environment variable (e.g. `[DE, NL]`).
    #[serde(default = "default_account_countries")]
    pub account_countries: Vec<String>,

    /// Countries shown on the aggregated country map.
    ///
    /// Set via GEOMAP_MAP_COUNTRIES environment variable (e.g. `[DE, NL, FR]`).
    #[serde(default = "default_map_countries")]
    pub map_countries: Vec<String>,
}

fn default_cache_db_path() -> PathBuf {
    PathBuf::from("./geomap-cache.sqlite")
}

fn default_store_db_path() -> PathBuf {
    PathBuf::from("./geomap-records.sqlite")
}

fn default_geocoder_base_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_user_agent() -> String {
    "geomap/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_rate_limit_ms() -> u64 {
    1_000
}

fn default_max_concurrency() -> usize {
    4
}

fn default_contact_limit() -> usize {
    200
}

fn default_account_limit() -> usize {
    100
}

fn default_account_countries() -> Vec<String> {
    ["DE", "NL", "GB"].map(String::from).to_vec()
}

fn default_map_countries() -> Vec<String> {
    ["DE", "NL", "GB", "PL", "FR"].map(String::from).to_vec()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_db_path: default_cache_db_path(),
            store_db_path: default_store_db_path(),
            geocoder_base_url: default_geocoder_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            rate_limit_ms: default_rate_limit_ms(),
            max_concurrency: default_max_concurrency(),
            contact_limit: default_contact_limit(),
            account_limit: default_account_limit(),
            account_countries: default_account_countries(),
            map_countries: default_map_countries(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Minimum spacing between outgoing geocoding requests.
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GEOMAP_`
    /// 2. TOML file from `GEOMAP_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GEOMAP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GEOMAP_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_db_path, PathBuf::from("./geomap-cache.sqlite"));
        assert_eq!(config.store_db_path, PathBuf::from("./geomap-records.sqlite"));
        assert_eq!(config.geocoder_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.user_agent, "geomap/0.1");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.contact_limit, 200);
        assert_eq!(config.account_limit, 100);
        assert_eq!(config.account_countries, vec!["DE", "NL", "GB"]);
        assert_eq!(config.map_countries, vec!["DE", "NL", "GB", "PL", "FR"]);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
        assert_eq!(config.rate_limit(), Duration::from_secs(1));
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("max_concurrency = 8\nmap_countries = [\"DE\", \"AT\"]"))
            .extract()
            .unwrap();

        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.map_countries, vec!["DE", "AT"]);
        assert_eq!(config.contact_limit, 200);
    }
}
