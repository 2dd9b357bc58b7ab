//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoder_port;
mod map_view_port;
mod route_port;
mod secret_store;

#[cfg(test)]
pub use geocoder_port::MockGeocoderPort;
pub use geocoder_port::GeocoderPort;
#[cfg(test)]
pub use map_view_port::MockMapViewPort;
pub use map_view_port::MapViewPort;
#[cfg(test)]
pub use route_port::MockRoutePort;
pub use route_port::RoutePort;
pub use secret_store::SecretStorePort;
