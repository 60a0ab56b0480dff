//! Configuration management

use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the platform API
    pub base_url: String,

    /// Fixed ceiling on how long a single request may take
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Response cache configuration
    pub cache: CacheConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
            cache: CacheConfig::default(),
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable read-through caching
    pub enabled: bool,

    /// How often the background sweep reclaims expired entries
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,

    /// Per-category TTLs
    pub ttl: CacheTtlConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval: Duration::from_secs(60),
            ttl: CacheTtlConfig::default(),
        }
    }
}

/// TTL per endpoint category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtlConfig {
    /// Paginated listings
    #[serde(with = "humantime_serde")]
    pub list: Duration,
    /// Single-resource detail views
    #[serde(with = "humantime_serde")]
    pub detail: Duration,
    /// Search results
    #[serde(with = "humantime_serde")]
    pub search: Duration,
    /// Dropdown and other near-static data
    #[serde(with = "humantime_serde")]
    pub dropdown: Duration,
    /// Dashboard statistics
    #[serde(with = "humantime_serde")]
    pub dashboard: Duration,
    /// Everything else
    #[serde(with = "humantime_serde")]
    pub default: Duration,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(2 * 60),
            detail: Duration::from_secs(5 * 60),
            search: Duration::from_secs(60),
            dropdown: Duration::from_secs(15 * 60),
            dashboard: Duration::from_secs(60),
            default: Duration::from_secs(3 * 60),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!("Config file not found: {}", p.display())));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Environment overrides, e.g. HOMESERVE_BASE_URL, HOMESERVE_CACHE__ENABLED
        figment = figment.merge(Env::prefixed("HOMESERVE_").split("__"));

        figment.extract().map_err(|e| Error::Config(e.to_string()))
    }
}
