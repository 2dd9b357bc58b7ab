//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod env_secret_store;
mod geocoding_adapter;
mod geojson_map_view;
mod routing_adapter;

pub use env_secret_store::EnvSecretStore;
pub use geocoding_adapter::GeocodingAdapter;
pub use geojson_map_view::{GeoJsonMapView, Viewport};
pub use routing_adapter::RoutingAdapter;
