//! Geocoding service port
//!
//! Defines the interface for forward (address → coordinate) and reverse
//! (coordinate → address) lookups.

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    /// Resolve a free-text address to the highest-ranked coordinate
    ///
    /// Implementations must reject blank input with
    /// [`ApplicationError::InvalidInput`] without contacting the service, and
    /// report an empty candidate list as [`ApplicationError::NotFound`].
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError>;

    /// Resolve a coordinate to a display address
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, ApplicationError>;
}
