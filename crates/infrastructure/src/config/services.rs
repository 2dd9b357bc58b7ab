//! External map service configuration (geocoding, routing)

use domain::TravelProfile;
use integration_routing::{NominatimConfig, OpenRouteServiceConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Geocoding Configuration
// ==============================

/// Nominatim geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Nominatim base URL (default: <https://nominatim.openstreetmap.org>)
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Forward lookup cache TTL in hours, 0 disables (default: 24)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Candidates requested per forward lookup (default: 1)
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Country code filter, empty for worldwide
    #[serde(default)]
    pub country_filter: String,

    /// User agent sent to Nominatim (their usage policy requires one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

const fn default_max_results() -> u8 {
    1
}

fn default_user_agent() -> String {
    format!(
        "Trailmap/{} (https://github.com/twohreichel/Trailmap)",
        env!("CARGO_PKG_VERSION")
    )
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            max_results: default_max_results(),
            country_filter: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl From<&GeocodingAppConfig> for NominatimConfig {
    fn from(config: &GeocodingAppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            cache_ttl_hours: config.cache_ttl_hours,
            max_results: config.max_results,
            country_filter: config.country_filter.clone(),
            user_agent: config.user_agent.clone(),
            ..Self::default()
        }
    }
}

// ==============================
// Routing Configuration
// ==============================

/// OpenRouteService routing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// OpenRouteService base URL (default: <https://api.openrouteservice.org>)
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (sensitive - uses `SecretString`)
    ///
    /// Usually supplied via `TRAILMAP_ROUTING__API_KEY` or the secret store.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Travel profiles requested on every search, in display order
    #[serde(default = "default_profiles")]
    pub profiles: Vec<TravelProfile>,
}

impl std::fmt::Debug for RoutingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAppConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("profiles", &self.profiles)
            .finish()
    }
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_profiles() -> Vec<TravelProfile> {
    TravelProfile::DEFAULTS.to_vec()
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
            profiles: default_profiles(),
        }
    }
}

impl RoutingAppConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

impl From<&RoutingAppConfig> for OpenRouteServiceConfig {
    fn from(config: &RoutingAppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            api_key: config.api_key.clone(),
            user_agent: default_user_agent(),
        }
    }
}
