//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: Nominatim geocoding,
//! OpenRouteService routing, an in-memory GeoJSON map view and an
//! environment-backed secret store. Also owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeocodingAppConfig, LogFormat, LoggingConfig, MapConfig, RoutingAppConfig,
    TileLayerConfig, WorkflowAppConfig,
};
pub use telemetry::{TelemetryError, init_logging};
