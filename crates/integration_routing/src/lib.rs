//! Map service integration for Trailmap
//!
//! Provides address geocoding via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org)
//! and route lookup via the [OpenRouteService](https://openrouteservice.org) directions API.
//!
//! # Architecture
//!
//! Each service sits behind a client trait. [`GeocodingClient`] converts
//! addresses to coordinates and back, implemented by [`NominatimGeocodingClient`].
//! [`RoutingClient`] requests one path per travel profile, implemented by
//! [`OpenRouteServiceClient`]. Both return domain types.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, TravelProfile};
//! use integration_routing::{OpenRouteServiceClient, OpenRouteServiceConfig, RoutingClient};
//!
//! let config = OpenRouteServiceConfig::with_api_key("...");
//! let client = OpenRouteServiceClient::new(&config)?;
//!
//! let detroit = Coordinate::new(42.3314, -83.0458)?;
//! let path = client
//!     .fetch_route(Coordinate::ann_arbor(), detroit, TravelProfile::FootWalking)
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{OpenRouteServiceClient, RoutingClient};
pub use config::{NominatimConfig, OpenRouteServiceConfig};
pub use error::{GeocodingError, RoutingError};
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
