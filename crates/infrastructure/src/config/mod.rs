//! Application configuration
//!
//! Split into focused sub-modules:
//! - `services`: Nominatim geocoding and OpenRouteService routing
//! - `map`: initial view, basemap tiles, route styles
//!
//! Sources are layered: built-in defaults, then `config.toml` (or an explicit
//! file), then `TRAILMAP_*` environment variables.

mod map;
mod services;

use std::path::Path;
use std::time::Duration;

use application::error::ApplicationError;
use application::ports::SecretStorePort;
use application::{ProfileStyle, WorkflowConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use map::{MapConfig, TileLayerConfig};
pub use services::{GeocodingAppConfig, RoutingAppConfig};

/// Environment variable prefix, e.g. `TRAILMAP_ROUTING__API_KEY`
pub const ENV_PREFIX: &str = "TRAILMAP";

/// Secret store key of the routing API key
pub const ROUTING_API_KEY_SECRET: &str = "routing/api_key";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: pretty)
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Route workflow tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowAppConfig {
    /// Upper bound for each geocoding or routing call in seconds (default: 10)
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

const fn default_call_timeout_secs() -> u64 {
    10
}

impl Default for WorkflowAppConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Routing service
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// Map presentation
    #[serde(default)]
    pub map: MapConfig,

    /// Route workflow
    #[serde(default)]
    pub workflow: WorkflowAppConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or `config.toml`
    /// (optional), overridden by environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or a source cannot be
    /// parsed or deserialized.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., TRAILMAP_MAP__ZOOM)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("routing.profiles")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check the configuration for values the services would reject
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the first bad value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        integration_routing::NominatimConfig::from(&self.geocoding)
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("geocoding: {e}")))?;
        integration_routing::OpenRouteServiceConfig::from(&self.routing)
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("routing: {e}")))?;

        if self.routing.profiles.is_empty() {
            return Err(ApplicationError::Configuration(
                "routing.profiles must name at least one profile".to_string(),
            ));
        }
        let mut seen = std::collections::BTreeSet::new();
        if let Some(repeated) = self.routing.profiles.iter().find(|p| !seen.insert(**p)) {
            return Err(ApplicationError::Configuration(format!(
                "routing.profiles lists {repeated} more than once"
            )));
        }
        if self.workflow.call_timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "workflow.call_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.map.fit_padding_ratio) {
            return Err(ApplicationError::Configuration(
                "map.fit_padding_ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.map.zoom > self.map.tiles.max_zoom {
            return Err(ApplicationError::Configuration(format!(
                "map.zoom {} exceeds map.tiles.max_zoom {}",
                self.map.zoom, self.map.tiles.max_zoom
            )));
        }
        for (profile, style) in &self.map.styles {
            style
                .validate()
                .map_err(|e| ApplicationError::Configuration(format!("map.styles.{profile}: {e}")))?;
        }
        Ok(())
    }

    /// Fill a missing routing API key from a secret store
    ///
    /// Existing config values are never overridden. A missing secret is
    /// logged, not treated as an error; the routing client reports it when
    /// it is built.
    ///
    /// # Errors
    ///
    /// Returns an error only if the secret store itself fails.
    pub async fn resolve_secrets(
        &mut self,
        store: &dyn SecretStorePort,
    ) -> Result<(), ApplicationError> {
        if self.routing.has_api_key() {
            debug!("Routing API key already configured");
            return Ok(());
        }

        match store.get_secret(ROUTING_API_KEY_SECRET).await {
            Ok(value) if !value.trim().is_empty() => {
                self.routing.api_key = Some(SecretString::from(value));
                info!("Loaded routing API key from secret store");
                Ok(())
            },
            Ok(_) | Err(ApplicationError::NotFound(_)) => {
                warn!(key = ROUTING_API_KEY_SECRET, "Routing API key not found in secret store");
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    /// Workflow settings derived from the routing, map and workflow sections
    #[must_use]
    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            profiles: self
                .routing
                .profiles
                .iter()
                .map(|profile| ProfileStyle::new(*profile, self.map.style_for(*profile)))
                .collect(),
            fit_padding_ratio: self.map.fit_padding_ratio,
            call_timeout: Duration::from_secs(self.workflow.call_timeout_secs),
        }
    }
}
